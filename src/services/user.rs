use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::user::{PublicUser, UserPatch},
    store::{StoreError, UserStore},
};

/// Profile access for the user named by a verified token. There is no way to
/// address another user's record through this service.
///
/// A verified token whose user has since disappeared is treated as an invalid
/// token, not a missing resource.
#[derive(Clone, Debug)]
pub struct UserService {
    repo: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserStore>) -> Self {
        Self { repo }
    }

    #[instrument(name = "UserService: Profile", skip(self))]
    pub async fn profile(&self, requester_id: Uuid) -> Result<PublicUser, AppError> {
        self.repo
            .find_user_by_id(requester_id)
            .await?
            .map(PublicUser::from)
            .ok_or(AppError::InvalidToken)
    }

    #[instrument(name = "UserService: Edit profile", skip(self))]
    pub async fn edit_profile(
        &self,
        requester_id: Uuid,
        patch: UserPatch,
    ) -> Result<PublicUser, AppError> {
        if patch.is_empty() {
            return self.profile(requester_id).await;
        }

        let user = self
            .repo
            .update_user(requester_id, &patch)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => AppError::DuplicateCredential,
                e => e.into(),
            })?
            .ok_or(AppError::InvalidToken)?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn seeded() -> (UserService, Uuid, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let a = store.insert_user("a@x.com", "hash").await.unwrap();
        let b = store.insert_user("b@x.com", "hash").await.unwrap();
        (UserService::new(store), a.id, b.id)
    }

    #[tokio::test]
    async fn edit_applies_only_given_fields() {
        let (users, a, _) = seeded().await;

        let updated = users
            .edit_profile(
                a,
                UserPatch {
                    first_name: Some("A".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name.as_deref(), Some("A"));
        assert_eq!(updated.last_name, None);
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(users.profile(a).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn edit_only_touches_the_requester() {
        let (users, a, b) = seeded().await;

        users
            .edit_profile(
                a,
                UserPatch {
                    last_name: Some("Changed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(users.profile(b).await.unwrap().last_name, None);
    }

    #[tokio::test]
    async fn taking_another_users_email_is_a_duplicate() {
        let (users, a, _) = seeded().await;

        let err = users
            .edit_profile(
                a,
                UserPatch {
                    email: Some("b@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateCredential));
    }

    #[tokio::test]
    async fn vanished_requester_is_an_invalid_token() {
        let (users, _, _) = seeded().await;
        let gone = Uuid::new_v4();

        assert!(matches!(
            users.profile(gone).await,
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            users
                .edit_profile(
                    gone,
                    UserPatch {
                        first_name: Some("A".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            users.edit_profile(gone, UserPatch::default()).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn empty_patch_returns_the_unchanged_user() {
        let (users, a, _) = seeded().await;
        let before = users.profile(a).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let after = users.edit_profile(a, UserPatch::default()).await.unwrap();

        assert_eq!(before, after);
        assert_eq!(users.profile(a).await.unwrap(), before);
    }
}
