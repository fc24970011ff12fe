//! Persistence seams. Services only see the [`UserStore`] and [`BookmarkStore`]
//! traits; Postgres backs them in production and [`MemoryStore`] in tests.

pub mod bookmark;
pub mod memory;
pub mod user;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::bookmark::{BookmarkModel, BookmarkPatch, NewBookmark};
use crate::models::user::{UserModel, UserPatch};

pub use bookmark::BookmarkRepository;
pub use memory::MemoryStore;
pub use user::UserRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
        }
        StoreError::Other(e.into())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Fails with [`StoreError::UniqueViolation`] when the email is taken.
    async fn insert_user(&self, email: &str, password_hash: &str)
    -> Result<UserModel, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError>;

    /// `None` when no user has this id.
    async fn update_user(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserModel>, StoreError>;
}

/// Every lookup and mutation is keyed by `(id, owner_id)`.
#[async_trait]
pub trait BookmarkStore: Send + Sync + std::fmt::Debug {
    async fn insert_bookmark(
        &self,
        owner_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<BookmarkModel, StoreError>;

    /// Insertion order.
    async fn list_bookmarks(&self, owner_id: Uuid) -> Result<Vec<BookmarkModel>, StoreError>;

    async fn find_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<BookmarkModel>, StoreError>;

    async fn update_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<BookmarkModel>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_bookmark(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError>;
}
