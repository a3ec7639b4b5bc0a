//! Public Catalog Routes
//!
//! Read-only browse surface, no token required (the auth middleware
//! skips `/api/catalog/`).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/subjects", get(handler::list_subjects))
        .route("/subjects/{slug}", get(handler::subject_detail))
        .route("/courses", get(handler::list_courses))
        .route("/courses/{slug}", get(handler::course_detail))
}
