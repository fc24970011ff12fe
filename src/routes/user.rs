use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    errors::AppError,
    models::user::{PublicUser, UserPatch},
    routes::{AppJson, require_email, require_non_empty},
    services::token::Claims,
    startup::AppState,
};

#[instrument(name = "HTTP: Get profile", skip(state, claims), fields(user_id = %claims.sub))]
pub async fn profile(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<PublicUser>, AppError> {
    let user = state.user_service.profile(claims.sub).await?;
    Ok(Json(user))
}

#[instrument(
    name = "HTTP: Edit user",
    skip(state, claims, patch),
    fields(user_id = %claims.sub)
)]
pub async fn edit_user(
    State(state): State<AppState>,
    claims: Claims,
    AppJson(patch): AppJson<UserPatch>,
) -> Result<Json<PublicUser>, AppError> {
    if let Some(email) = &patch.email {
        require_email(email)?;
    }
    if let Some(first_name) = &patch.first_name {
        require_non_empty("firstName", first_name)?;
    }
    if let Some(last_name) = &patch.last_name {
        require_non_empty("lastName", last_name)?;
    }

    let user = state.user_service.edit_profile(claims.sub, patch).await?;
    Ok(Json(user))
}
