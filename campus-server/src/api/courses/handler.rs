//! Course Handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{course, module, subject};
use crate::utils::validation::{
    MAX_TEXT_LEN, MAX_TITLE_LEN, validate_required_text, validate_slug, validate_text_len,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Course, CourseCreate, CourseSummary, CourseUpdate, Module, ModuleCreate, ModuleEdit,
    ReorderRequest,
};

#[derive(Serialize)]
pub struct CourseWithModules {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<Module>,
}

/// Resolve a course through the caller's ownership.
async fn owned_course(state: &ServerState, id: i64, user: &CurrentUser) -> AppResult<Course> {
    course::find_owned(state.pool(), id, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CourseNotFound))
}

/// GET /api/manage/courses - the caller's courses
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CourseSummary>>> {
    let courses = course::find_summaries_by_owner(state.pool(), user.id).await?;
    Ok(Json(courses))
}

/// POST /api/manage/courses - create a course owned by the caller
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CourseCreate>,
) -> AppResult<Json<Course>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_slug(&payload.slug, "slug")?;
    validate_required_text(&payload.overview, "overview", MAX_TEXT_LEN)?;

    if subject::find_by_id(state.pool(), payload.subject_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::SubjectNotFound));
    }
    if course::find_by_slug(state.pool(), &payload.slug)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::CourseSlugExists));
    }

    let course = course::create(state.pool(), user.id, payload).await?;
    Ok(Json(course))
}

/// GET /api/manage/courses/{id} - one owned course with its modules
pub async fn detail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<CourseWithModules>> {
    let course = owned_course(&state, id, &user).await?;
    let modules = module::find_by_course(state.pool(), course.id).await?;
    Ok(Json(CourseWithModules { course, modules }))
}

/// PUT /api/manage/courses/{id} - update an owned course
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CourseUpdate>,
) -> AppResult<Json<Course>> {
    let existing = owned_course(&state, id, &user).await?;

    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_slug(slug, "slug")?;
        if slug != &existing.slug && course::find_by_slug(state.pool(), slug).await?.is_some() {
            return Err(AppError::new(ErrorCode::CourseSlugExists));
        }
    }
    if let Some(overview) = &payload.overview {
        validate_required_text(overview, "overview", MAX_TEXT_LEN)?;
    }
    if let Some(subject_id) = payload.subject_id
        && subject::find_by_id(state.pool(), subject_id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::SubjectNotFound));
    }

    let course = course::update(state.pool(), id, payload).await?;
    Ok(Json(course))
}

/// DELETE /api/manage/courses/{id} - remove an owned course and everything under it
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    owned_course(&state, id, &user).await?;
    let deleted = course::delete(state.pool(), id).await?;
    Ok(Json(deleted))
}

/// PUT /api/manage/courses/{id}/modules - bulk edit the module list
///
/// Mirrors a formset submit: rows with an id update, rows without
/// insert, `delete: true` removes. Ids must belong to this course.
pub async fn sync_modules(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(edits): Json<Vec<ModuleEdit>>,
) -> AppResult<Json<Vec<Module>>> {
    let course = owned_course(&state, id, &user).await?;

    let known: HashSet<i64> = module::find_by_course(state.pool(), course.id)
        .await?
        .iter()
        .map(|m| m.id)
        .collect();
    for edit in &edits {
        if let Some(edit_id) = edit.id
            && !known.contains(&edit_id)
        {
            return Err(AppError::new(ErrorCode::ModuleCourseMismatch));
        }
        if !edit.delete {
            validate_required_text(&edit.title, "title", MAX_TITLE_LEN)?;
            validate_text_len(&edit.description, "description", MAX_TEXT_LEN)?;
        }
    }

    let modules = module::sync_for_course(state.pool(), course.id, &edits).await?;
    Ok(Json(modules))
}

/// POST /api/manage/courses/{id}/modules - append one module
pub async fn add_module(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ModuleCreate>,
) -> AppResult<Json<Module>> {
    let course = owned_course(&state, id, &user).await?;

    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_text_len(&payload.description, "description", MAX_TEXT_LEN)?;

    let module = module::create(state.pool(), course.id, payload).await?;
    Ok(Json(module))
}

/// POST /api/manage/courses/{id}/modules/order - reposition modules
pub async fn reorder_modules(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<Json<Vec<Module>>> {
    let course = owned_course(&state, id, &user).await?;

    let known: HashSet<i64> = module::find_by_course(state.pool(), course.id)
        .await?
        .iter()
        .map(|m| m.id)
        .collect();
    for module_id in payload.orders.keys() {
        if !known.contains(module_id) {
            return Err(AppError::new(ErrorCode::ModuleCourseMismatch));
        }
    }

    module::reorder(state.pool(), course.id, &payload.orders).await?;
    let modules = module::find_by_course(state.pool(), course.id).await?;
    Ok(Json(modules))
}
