use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;
use uuid::Uuid;

use crate::models::user::{UserModel, UserPatch};
use crate::store::{StoreError, UserStore};

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[instrument(name = "Saving new user to database", skip(self, password_hash))]
    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserModel, StoreError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(user)
    }

    #[instrument(name = "Fetching user by id from database", skip(self))]
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, StoreError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(name = "Fetching user by email from database", skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {:?}", e);
            e
        })?;
        Ok(user)
    }

    #[instrument(name = "Updating user in database", skip(self))]
    async fn update_user(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserModel>, StoreError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"UPDATE users SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at"#,
        )
        .bind(id)
        .bind(patch.email.as_deref())
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
