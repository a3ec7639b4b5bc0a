//! Module Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{content, module};
use crate::utils::validation::{
    MAX_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN, validate_required_text, validate_text_len,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ContentCreate, ContentItemCreate, ContentWithItem, Module, ModuleUpdate, ReorderRequest,
};

#[derive(Serialize)]
pub struct ModuleWithContents {
    #[serde(flatten)]
    pub module: Module,
    pub contents: Vec<ContentWithItem>,
}

/// Resolve a module through the caller's ownership of its course.
async fn owned_module(state: &ServerState, id: i64, user: &CurrentUser) -> AppResult<Module> {
    module::find_owned(state.pool(), id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ModuleNotFound))
}

/// GET /api/manage/modules/{id} - one owned module with its contents
pub async fn detail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ModuleWithContents>> {
    let module = owned_module(&state, id, &user).await?;
    let contents = content::find_by_module(state.pool(), module.id).await?;
    Ok(Json(ModuleWithContents { module, contents }))
}

/// PUT /api/manage/modules/{id} - update an owned module
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ModuleUpdate>,
) -> AppResult<Json<Module>> {
    owned_module(&state, id, &user).await?;

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_text_len(description, "description", MAX_TEXT_LEN)?;
    }

    let module = module::update(state.pool(), id, payload).await?;
    Ok(Json(module))
}

/// DELETE /api/manage/modules/{id} - remove an owned module and its contents
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    owned_module(&state, id, &user).await?;
    let deleted = module::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

/// POST /api/manage/modules/{id}/contents - attach a new content item
pub async fn add_content(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ContentCreate>,
) -> AppResult<Json<ContentWithItem>> {
    let module = owned_module(&state, id, &user).await?;

    validate_required_text(payload.item.title(), "title", MAX_TITLE_LEN)?;
    match &payload.item {
        ContentItemCreate::Text { body, .. } => {
            validate_required_text(body, "body", MAX_TEXT_LEN)?;
        }
        ContentItemCreate::File { file_url, .. } | ContentItemCreate::Image { file_url, .. } => {
            validate_required_text(file_url, "file_url", MAX_URL_LEN)?;
        }
        ContentItemCreate::Video { url, .. } => {
            validate_required_text(url, "url", MAX_URL_LEN)?;
        }
    }

    let content = content::create(state.pool(), module.id, user.id, payload).await?;
    Ok(Json(content))
}

/// POST /api/manage/modules/{id}/contents/order - reposition contents
pub async fn reorder_contents(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<Json<Vec<ContentWithItem>>> {
    let module = owned_module(&state, id, &user).await?;

    let known: HashSet<i64> = content::ids_for_module(state.pool(), module.id)
        .await?
        .into_iter()
        .collect();
    for content_id in payload.orders.keys() {
        if !known.contains(content_id) {
            return Err(AppError::new(ErrorCode::ContentModuleMismatch));
        }
    }

    content::reorder(state.pool(), module.id, &payload.orders).await?;
    let contents = content::find_by_module(state.pool(), module.id).await?;
    Ok(Json(contents))
}
