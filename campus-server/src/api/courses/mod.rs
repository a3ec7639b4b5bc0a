//! Course Management Routes
//!
//! Owner-scoped CRUD on courses plus the module structure of a course
//! (bulk edit, append, reorder). Every handler resolves the course
//! through the caller's ownership, so foreign ids read as not found.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manage/courses", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::detail)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/modules",
            put(handler::sync_modules).post(handler::add_module),
        )
        .route("/{id}/modules/order", post(handler::reorder_modules))
        .layer(middleware::from_fn(require_permission("courses:manage")))
}
