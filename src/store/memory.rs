use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::bookmark::{BookmarkModel, BookmarkPatch, NewBookmark};
use crate::models::user::{UserModel, UserPatch};
use crate::store::{BookmarkStore, StoreError, UserStore};

/// In-process store with the same uniqueness and ownership rules as the
/// Postgres schema. Rows are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserModel>>,
    bookmarks: RwLock<Vec<BookmarkModel>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserModel, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::UniqueViolation);
        }
        let now = Utc::now();
        let user = UserModel {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserModel>, StoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &patch.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::UniqueViolation);
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &patch.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            user.last_name = Some(last_name.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn insert_bookmark(
        &self,
        owner_id: Uuid,
        bookmark: &NewBookmark,
    ) -> Result<BookmarkModel, StoreError> {
        let now = Utc::now();
        let row = BookmarkModel {
            id: Uuid::new_v4(),
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            link: bookmark.link.clone(),
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        };
        self.bookmarks.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_bookmarks(&self, owner_id: Uuid) -> Result<Vec<BookmarkModel>, StoreError> {
        let bookmarks = self.bookmarks.read().await;
        Ok(bookmarks
            .iter()
            .filter(|b| b.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<Option<BookmarkModel>, StoreError> {
        let bookmarks = self.bookmarks.read().await;
        Ok(bookmarks
            .iter()
            .find(|b| b.id == id && b.user_id == owner_id)
            .cloned())
    }

    async fn update_bookmark(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: &BookmarkPatch,
    ) -> Result<Option<BookmarkModel>, StoreError> {
        let mut bookmarks = self.bookmarks.write().await;
        let Some(row) = bookmarks
            .iter_mut()
            .find(|b| b.id == id && b.user_id == owner_id)
        else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            row.title = title.clone();
        }
        if let Some(description) = &patch.description {
            row.description = Some(description.clone());
        }
        if let Some(link) = &patch.link {
            row.link = link.clone();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_bookmark(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut bookmarks = self.bookmarks.write().await;
        let before = bookmarks.len();
        bookmarks.retain(|b| !(b.id == id && b.user_id == owner_id));
        Ok(bookmarks.len() != before)
    }
}
