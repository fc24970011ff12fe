use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;
use uuid::Uuid;

use crate::models::bookmark::{BookmarkModel, BookmarkPatch, NewBookmark};
use crate::store::{BookmarkStore, StoreError};

#[derive(Clone, Debug)]
pub struct BookmarkRepository {
    pg_pool: Pool<Postgres>,
}

impl BookmarkRepository {
    pub fn new(pg_pool: Pool<Postgres>) -> Self {
        Self { pg_pool }
    }
}

#[async_trait]
impl BookmarkStore for BookmarkRepository {
    #[instrument(name = "Saving bookmark to database", skip(self, bookmark))]
    async fn insert_bookmark(
        &self,
        owner_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<BookmarkModel, StoreError> {
        let row = sqlx::query_as::<_, BookmarkModel>(
            r#"INSERT INTO bookmarks (id, title, description, link, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, link, user_id, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&bookmark.title)
        .bind(bookmark.description.as_deref())
        .bind(&bookmark.link)
        .bind(owner_id)
        .fetch_one(&self.pg_pool)
        .await?;
        Ok(row)
    }

    #[instrument(name = "Listing bookmarks from database", skip(self))]
    async fn list_bookmarks(&self, owner_id: Uuid) -> Result<Vec<BookmarkModel>, StoreError> {
        let rows = sqlx::query_as::<_, BookmarkModel>(
            r#"SELECT id, title, description, link, user_id, created_at, updated_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY created_at, id"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pg_pool)
        .await?;
        Ok(rows)
    }

    #[instrument(name = "Fetching bookmark from database", skip(self))]
    async fn find_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<BookmarkModel>, StoreError> {
        let row = sqlx::query_as::<_, BookmarkModel>(
            r#"SELECT id, title, description, link, user_id, created_at, updated_at
            FROM bookmarks
            WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pg_pool)
        .await?;
        Ok(row)
    }

    #[instrument(name = "Updating bookmark in database", skip(self, patch))]
    async fn update_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<BookmarkModel>, StoreError> {
        let row = sqlx::query_as::<_, BookmarkModel>(
            r#"UPDATE bookmarks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                link = COALESCE($5, link),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, link, user_id, created_at, updated_at"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.link.as_deref())
        .fetch_optional(&self.pg_pool)
        .await?;
        Ok(row)
    }

    #[instrument(name = "Deleting bookmark from database", skip(self))]
    async fn delete_bookmark(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pg_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
