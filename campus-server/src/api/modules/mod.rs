//! Module Management Routes
//!
//! Module-level reads and edits plus the contents of a module. Modules
//! are addressed by id; ownership is checked through the parent course.

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/manage/modules", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{id}",
            get(handler::detail)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/contents", post(handler::add_content))
        .route("/{id}/contents/order", post(handler::reorder_contents))
        .layer(middleware::from_fn(require_permission("contents:manage")))
}
