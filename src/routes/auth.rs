use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::AppError;
use crate::routes::{AppJson, require_email, require_non_empty};
use crate::services::auth::AuthService;
use crate::services::token::Claims;
use crate::startup::AppState;

#[derive(Debug, Serialize)]
pub struct AuthBody {
    access_token: String,
}

/// Missing fields deserialize to empty strings so they fail validation with
/// a field-specific message instead of a generic JSON error.
#[derive(Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl AuthPayload {
    fn validate(&self) -> Result<(), AppError> {
        require_email(&self.email)?;
        require_non_empty("password", &self.password)
    }
}

#[instrument(
    name = "HTTP: Signup",
    skip(state, payload),
    fields(user_email = %payload.email)
)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .signup(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(
    name = "HTTP: Login",
    skip(state, payload),
    fields(user_email = %payload.email)
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AuthPayload>,
) -> Result<Json<AuthBody>, AppError> {
    tracing::info!("Received login request");
    payload.validate()?;

    let access_token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    tracing::info!("JWT issued for user");
    Ok(Json(AuthBody { access_token }))
}

impl<S> FromRequestParts<S> for Claims
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    #[instrument(name = "Extracting Claims", skip(state, parts))]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                tracing::warn!("No bearer token in Authorization header");
                AppError::InvalidToken
            })?;

        AuthService::from_ref(state).authenticate(bearer.token())
    }
}
