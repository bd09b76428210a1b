use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Screen Router Module
///
/// Every navigable path goes through [`handlers::navigate`], which asks the
/// route gate what to show. The syllabus and tools paths also take the admin
/// form posts; the handlers check the role after the gate.
pub fn screen_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::navigate))
        .route(
            "/syllabus",
            get(handlers::navigate).post(handlers::add_syllabus),
        )
        .route("/attendance", get(handlers::navigate))
        .route("/roadmap", get(handlers::navigate))
        .route("/tools", get(handlers::navigate).post(handlers::add_tool))
        // Anything else: the gate still runs first, then the NotFound screen.
        .route("/{*path}", get(handlers::navigate))
}
