use std::{fmt, sync::Arc};

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::instrument;

use crate::{
    errors::AppError,
    models::user::PublicUser,
    services::token::{Claims, TokenIssuer},
    store::{StoreError, UserStore},
};

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    hasher: Argon2<'static>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("repo", &self.repo)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self {
            repo,
            tokens,
            hasher: Argon2::default(),
        }
    }

    /// Swap the Argon2 parameters, e.g. cheaper ones in tests.
    pub fn with_hasher(mut self, hasher: Argon2<'static>) -> Self {
        self.hasher = hasher;
        self
    }

    #[instrument(
        name = "AuthService: Signup",
        skip(self, password),
        fields(user_email = %email)
    )]
    pub async fn signup(&self, email: &str, password: &str) -> Result<PublicUser, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| anyhow::anyhow!("failed to hash password"))?
            .to_string();

        let user = self
            .repo
            .insert_user(email, &hash)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => {
                    tracing::warn!("Signup rejected: email already registered");
                    AppError::DuplicateCredential
                }
                e => e.into(),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    #[instrument(
        name = "AuthService: Login attempt",
        skip(self, password),
        fields(user_email = %email)
    )]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        // 1. Fetch User
        let user = self.repo.find_user_by_email(email).await.map_err(|e| {
            tracing::error!("Database error during login: {:?}", e);
            AppError::from(e)
        })?;

        let user = match user {
            Some(u) => u,
            None => {
                tracing::warn!("Login failed: User not found");
                return Err(AppError::InvalidCredential);
            }
        };

        // 2. Parse Hash
        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            tracing::error!("Critical: Failed to parse password hash from DB: {:?}", e);
            anyhow::anyhow!("stored password hash is malformed")
        })?;

        // 3. Verify Password
        if self
            .hasher
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            tracing::warn!("Login failed: Invalid password provided");
            return Err(AppError::InvalidCredential);
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        tracing::info!("User authenticated successfully");
        Ok(token)
    }

    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.verify(token)
    }
}
