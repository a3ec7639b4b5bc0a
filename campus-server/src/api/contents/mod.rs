//! Content Management Routes
//!
//! Edits on individual content items. Creation and ordering live under
//! the parent module's routes.

mod handler;

use axum::{Router, middleware, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manage/contents", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission("contents:manage")))
}
