use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Session Action Router
///
/// The HTML forms of the role-selection, login and navigation pages post here.
/// Every action answers with a `303 See Other` back to a page, except a failed
/// login, which re-renders the login form in place.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        // POST /session/role
        // Role selection. Idempotent; ignored once authenticated.
        .route("/session/role", post(handlers::select_role_form))
        // POST /session/back
        // Leaves the login form and clears the pending role.
        .route("/session/back", post(handlers::back_form))
        // POST /session/login
        // Credential check against the pending role.
        .route("/session/login", post(handlers::login_form))
        // POST /session/logout
        .route("/session/logout", post(handlers::logout_form))
}
