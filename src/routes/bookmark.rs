use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::bookmark::{BookmarkModel, BookmarkPatch, NewBookmark},
    routes::{AppJson, require_non_empty},
    services::token::Claims,
    startup::AppState,
};

#[instrument(name = "HTTP: List bookmarks", skip(state, claims), fields(user_id = %claims.sub))]
pub async fn list_bookmarks(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<BookmarkModel>>, AppError> {
    let bookmarks = state.bookmark_service.list(claims.sub).await?;
    Ok(Json(bookmarks))
}

/// 200 with the bookmark, or 200 with an empty body when the requester has
/// no bookmark by that id.
#[instrument(name = "HTTP: Get bookmark", skip(state, claims), fields(user_id = %claims.sub))]
pub async fn get_bookmark(
    State(state): State<AppState>,
    claims: Claims,
    Path(bookmark_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bookmark = state
        .bookmark_service
        .get_by_id(claims.sub, bookmark_id)
        .await?;

    Ok(match bookmark {
        Some(bookmark) => Json(bookmark).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

#[instrument(
    name = "HTTP: Create bookmark",
    skip(state, claims, bookmark),
    fields(user_id = %claims.sub)
)]
pub async fn create_bookmark(
    State(state): State<AppState>,
    claims: Claims,
    AppJson(bookmark): AppJson<NewBookmark>,
) -> Result<impl IntoResponse, AppError> {
    require_non_empty("title", &bookmark.title)?;
    require_non_empty("link", &bookmark.link)?;

    let created = state.bookmark_service.create(claims.sub, bookmark).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(
    name = "HTTP: Edit bookmark",
    skip(state, claims, patch),
    fields(user_id = %claims.sub)
)]
pub async fn edit_bookmark(
    State(state): State<AppState>,
    claims: Claims,
    Path(bookmark_id): Path<Uuid>,
    AppJson(patch): AppJson<BookmarkPatch>,
) -> Result<Json<BookmarkModel>, AppError> {
    if let Some(title) = &patch.title {
        require_non_empty("title", title)?;
    }
    if let Some(link) = &patch.link {
        require_non_empty("link", link)?;
    }

    let edited = state
        .bookmark_service
        .edit(claims.sub, bookmark_id, patch)
        .await?;
    Ok(Json(edited))
}

#[instrument(name = "HTTP: Delete bookmark", skip(state, claims), fields(user_id = %claims.sub))]
pub async fn delete_bookmark(
    State(state): State<AppState>,
    claims: Claims,
    Path(bookmark_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .bookmark_service
        .delete(claims.sub, bookmark_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
