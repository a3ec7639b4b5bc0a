//! User Management Routes
//!
//! Admin-only account administration. There is no delete: accounts are
//! deactivated through `is_active` so owned courses keep a valid owner.

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update))
        .layer(middleware::from_fn(require_admin))
}
