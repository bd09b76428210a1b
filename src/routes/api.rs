use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API Router
///
/// Same session state machine as the form actions, for programmatic clients.
/// Errors come back as `{"error": ...}` with the status of the matching
/// `AppError` variant.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /api/session
        .route("/api/session", get(handlers::get_session))
        // POST /api/session/role
        .route("/api/session/role", post(handlers::select_role))
        // POST /api/session/back
        .route("/api/session/back", post(handlers::leave_login))
        // POST /api/session/login
        .route("/api/session/login", post(handlers::login))
        // POST /api/session/logout
        .route("/api/session/logout", post(handlers::logout))
        // GET /api/route?path=...
        // What navigating to `path` would show this session, without rendering it.
        .route("/api/route", get(handlers::resolve_route))
}
