use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Session state, credential check and the route gate.
pub mod auth;
pub mod gate;
pub mod session;

// Views, content screens and their fixture data.
pub mod fixtures;
pub mod html;
pub mod screens;
pub mod views;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;

// Routing segregation (public, session actions, JSON API, gated screens).
pub mod routes;
use routes::{api, public, screens as screen_routes, session as session_routes};

// --- Public Re-exports ---

pub use auth::{CredentialState, MockCredentials, StaticCredentials};
pub use config::AppConfig;
pub use errors::AppError;
pub use session::{InMemorySessionStore, SessionStore, SessionStoreState};

/// ApiDoc
///
/// Auto-generated OpenAPI document for the JSON session API, served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_session, handlers::select_role, handlers::leave_login,
        handlers::login, handlers::logout, handlers::resolve_route
    ),
    components(
        schemas(
            models::Role, models::Identity, models::SessionStateKind, models::SessionView,
            models::GateScreen, models::RouteResolution, models::SelectRoleRequest,
            models::LoginRequest, models::ErrorResponse, views::View,
        )
    ),
    tags(
        (name = "intern-portal", description = "Intern Management System session API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single container of shared services, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Every live session, keyed by the opaque cookie id.
    pub sessions: SessionStoreState,
    /// The credential check consulted on login.
    pub credentials: CredentialState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionStoreState {
    fn from_ref(app_state: &AppState) -> SessionStoreState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for CredentialState {
    fn from_ref(app_state: &AppState) -> CredentialState {
        app_state.credentials.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// session_middleware
///
/// Binds a session to every request on the session, API and screen routers.
/// A valid cookie resumes its session; a missing, malformed or expired one gets
/// a fresh session in the initial state and a `Set-Cookie` on the response.
async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session_cookie.as_str();

    let resumed = match session::session_id_from_headers(request.headers(), cookie_name) {
        Some(id) => state.sessions.get(id).await.map(|cell| (id, cell)),
        None => None,
    };
    let issued = resumed.is_none();
    let (id, cell) = match resumed {
        Some(found) => found,
        None => state.sessions.create().await,
    };

    request
        .extensions_mut()
        .insert(session::ActiveSession { id, cell });
    let mut response = next.run(request).await;

    if issued {
        let cookie = session::session_cookie(cookie_name, id, state.config.secure_cookies());
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::error!(error = %err, "session cookie is not a valid header value"),
        }
    }
    response
}

/// create_router
///
/// Assembles the routing structure, applies global and scoped middleware and
/// registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Session-bound routers. Every request through these carries an ActiveSession.
    let session_bound = Router::new()
        .merge(session_routes::session_routes())
        .merge(api::api_routes())
        .merge(screen_routes::screen_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    // 3. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(session_bound)
        .with_state(state);

    // 4. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    x_request_id.clone(),
                    MakeRequestUuid,
                ))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span with method, URI and the generated request id so
/// every log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
