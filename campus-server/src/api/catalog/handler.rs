//! Catalog Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{course, module, subject};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CourseSummary, Module, Subject, SubjectWithCount};

#[derive(Serialize)]
pub struct SubjectDetailResponse {
    #[serde(flatten)]
    pub subject: Subject,
    pub courses: Vec<CourseSummary>,
}

#[derive(Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseSummary,
    pub modules: Vec<Module>,
}

/// GET /api/catalog/subjects - subjects with course counts, by title
pub async fn list_subjects(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<SubjectWithCount>>> {
    let subjects = subject::find_all_with_counts(state.pool()).await?;
    Ok(Json(subjects))
}

/// GET /api/catalog/subjects/{slug} - one subject with its courses
pub async fn subject_detail(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<SubjectDetailResponse>> {
    let subject = subject::find_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SubjectNotFound))?;
    let courses = course::find_summaries_by_subject(state.pool(), subject.id).await?;
    Ok(Json(SubjectDetailResponse { subject, courses }))
}

/// GET /api/catalog/courses - all courses, newest first
pub async fn list_courses(State(state): State<ServerState>) -> AppResult<Json<Vec<CourseSummary>>> {
    let courses = course::find_summaries(state.pool()).await?;
    Ok(Json(courses))
}

/// GET /api/catalog/courses/{slug} - course detail with ordered modules
pub async fn course_detail(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CourseDetailResponse>> {
    let course = course::find_summary_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CourseNotFound))?;
    let modules = module::find_by_course(state.pool(), course.id).await?;
    Ok(Json(CourseDetailResponse { course, modules }))
}
