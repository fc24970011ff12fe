use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::bookmark::{BookmarkModel, BookmarkPatch, NewBookmark},
    store::BookmarkStore,
};

/// Owner-scoped bookmark operations.
///
/// A bookmark that exists but belongs to someone else is reported exactly
/// like one that does not exist: `None` from [`BookmarkService::get_by_id`],
/// [`AppError::AccessDenied`] from edit and delete.
#[derive(Clone, Debug)]
pub struct BookmarkService {
    repo: Arc<dyn BookmarkStore>,
}

impl BookmarkService {
    pub fn new(repo: Arc<dyn BookmarkStore>) -> Self {
        Self { repo }
    }

    #[instrument(name = "Service: Create bookmark", skip(self, bookmark))]
    pub async fn create(
        &self,
        owner_id: Uuid,
        bookmark: NewBookmark,
    ) -> Result<BookmarkModel, AppError> {
        Ok(self.repo.insert_bookmark(owner_id, &bookmark).await?)
    }

    #[instrument(name = "Service: List bookmarks", skip(self))]
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<BookmarkModel>, AppError> {
        Ok(self.repo.list_bookmarks(owner_id).await?)
    }

    #[instrument(name = "Service: Get bookmark", skip(self))]
    pub async fn get_by_id(
        &self,
        owner_id: Uuid,
        bookmark_id: Uuid,
    ) -> Result<Option<BookmarkModel>, AppError> {
        Ok(self.repo.find_bookmark(owner_id, bookmark_id).await?)
    }

    #[instrument(name = "Service: Edit bookmark", skip(self, patch))]
    pub async fn edit(
        &self,
        owner_id: Uuid,
        bookmark_id: Uuid,
        patch: BookmarkPatch,
    ) -> Result<BookmarkModel, AppError> {
        self.ensure_owned(owner_id, bookmark_id).await?;

        // The row can vanish between the check and the update.
        self.repo
            .update_bookmark(owner_id, bookmark_id, &patch)
            .await?
            .ok_or(AppError::AccessDenied)
    }

    #[instrument(name = "Service: Delete bookmark", skip(self))]
    pub async fn delete(&self, owner_id: Uuid, bookmark_id: Uuid) -> Result<(), AppError> {
        self.ensure_owned(owner_id, bookmark_id).await?;

        if !self.repo.delete_bookmark(owner_id, bookmark_id).await? {
            return Err(AppError::AccessDenied);
        }
        Ok(())
    }

    async fn ensure_owned(&self, owner_id: Uuid, bookmark_id: Uuid) -> Result<(), AppError> {
        match self.repo.find_bookmark(owner_id, bookmark_id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(%bookmark_id, "Bookmark not found for requester");
                Err(AppError::AccessDenied)
            }
        }
    }
}
