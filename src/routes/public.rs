use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a session. Nothing here creates one.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
}
