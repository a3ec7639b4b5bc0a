//! Subject Catalog Routes
//!
//! Write operations on the subject taxonomy. Reads are public under
//! `/api/catalog/subjects`.

mod handler;

use axum::{Router, middleware, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/subjects", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission("subjects:manage")))
}
