//! Subject Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::subject;
use crate::utils::validation::{MAX_TITLE_LEN, validate_required_text, validate_slug};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Subject, SubjectCreate, SubjectUpdate};

/// POST /api/subjects - create a subject
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SubjectCreate>,
) -> AppResult<Json<Subject>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_slug(&payload.slug, "slug")?;

    if subject::find_by_slug(state.pool(), &payload.slug)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::SubjectSlugExists));
    }

    let subject = subject::create(state.pool(), payload).await?;
    Ok(Json(subject))
}

/// PUT /api/subjects/{id} - rename or re-slug a subject
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SubjectUpdate>,
) -> AppResult<Json<Subject>> {
    let existing = subject::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SubjectNotFound))?;

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_slug(slug, "slug")?;
        if slug != &existing.slug
            && subject::find_by_slug(state.pool(), slug).await?.is_some()
        {
            return Err(AppError::new(ErrorCode::SubjectSlugExists));
        }
    }

    let subject = subject::update(state.pool(), id, payload).await?;
    Ok(Json(subject))
}

/// DELETE /api/subjects/{id} - remove a subject without courses
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if subject::course_count(state.pool(), id).await? > 0 {
        return Err(AppError::new(ErrorCode::SubjectHasCourses));
    }

    let deleted = subject::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::SubjectNotFound));
    }
    Ok(Json(true))
}
