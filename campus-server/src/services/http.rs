//! HTTP Application Assembly
//!
//! Merges the per-resource routers and applies the middleware stack.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Merge the per-resource routers (without state)
fn build_routes() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Public surface
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::catalog::router())
        // Management surface
        .merge(crate::api::subjects::router())
        .merge(crate::api::courses::router())
        .merge(crate::api::modules::router())
        .merge(crate::api::contents::router())
        .merge(crate::api::users::router())
}

/// Build the application with its middleware stack
///
/// `require_auth` is applied at router level; it skips the public
/// allowlist internally. Permission checks sit on the route groups.
pub fn build_app(state: ServerState) -> Router {
    build_routes()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}
