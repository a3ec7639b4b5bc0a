//! Content Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::content;
use crate::utils::validation::{
    MAX_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{ContentUpdate, ContentWithItem};

/// Resolve a content row through the caller's ownership of its course.
async fn owned_content(
    state: &ServerState,
    id: i64,
    user: &CurrentUser,
) -> AppResult<ContentWithItem> {
    content::find_owned(state.pool(), id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ContentNotFound))
}

/// PUT /api/manage/contents/{id} - update an owned content item
///
/// Only the payload field matching the stored item type is applied; the
/// type itself cannot change.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ContentUpdate>,
) -> AppResult<Json<ContentWithItem>> {
    owned_content(&state, id, &user).await?;

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(body) = &payload.body {
        validate_required_text(body, "body", MAX_TEXT_LEN)?;
    }
    if let Some(file_url) = &payload.file_url {
        validate_required_text(file_url, "file_url", MAX_URL_LEN)?;
    }
    if let Some(url) = &payload.url {
        validate_required_text(url, "url", MAX_URL_LEN)?;
    }

    let content = content::update(state.pool(), id, payload).await?;
    Ok(Json(content))
}

/// DELETE /api/manage/contents/{id} - remove an owned content item
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    owned_content(&state, id, &user).await?;
    let deleted = content::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}
