use crate::{
    AppState,
    errors::AppError,
    gate::{self, Screen},
    html,
    models::{self, Identity, LoginRequest, Role, RouteResolution, SelectRoleRequest, SessionView},
    screens::{self, ScreenQuery, syllabus::SyllabusDraft, tools::ToolDraft},
    session::{ActiveSession, Session},
    views::View,
};
use axum::{
    Form, Json,
    extract::{
        FromRequest, Query, Request, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

// --- Form & Query Structs ---

/// RoleForm
///
/// Body of `POST /session/role`.
#[derive(Deserialize)]
pub struct RoleForm {
    pub role: String,
    #[serde(default)]
    pub next: String,
}

/// NextForm
///
/// Body of form actions that only carry a return path.
#[derive(Deserialize, Default)]
pub struct NextForm {
    #[serde(default)]
    pub next: String,
}

/// LoginForm
///
/// Body of `POST /session/login`. The role comes from the session.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

/// RouteQuery
///
/// Query parameters of `GET /api/route`.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteQuery {
    /// Path to resolve. Defaults to `/`.
    pub path: Option<String>,
}

/// ApiJson
///
/// `Json` whose rejection is an [`AppError`], so malformed API bodies get the
/// same `{"error": ...}` shape as every other API failure.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
    T: Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected API body");
                Err(AppError::from(rejection))
            }
        }
    }
}

const LOGIN_FAILED: &str =
    "Invalid username or password. Try 'administrator/password' or 'intern/password'";

// --- Helpers ---

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// safe_next
///
/// Only same-site absolute paths made of visible ASCII are accepted as
/// redirect targets; anything else falls back to `/`.
pub fn safe_next(raw: &str) -> &str {
    let valid = raw.starts_with('/')
        && !raw.starts_with("//")
        && !raw.contains('\\')
        && raw.bytes().all(|byte| byte.is_ascii_graphic());
    if valid { raw } else { "/" }
}

fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|target| target.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Renders the gate page for an unauthenticated session.
fn gate_page(screen: Screen, next: &str) -> Response {
    match screen {
        Screen::RoleSelection => Html(html::role_selection(next)).into_response(),
        Screen::Login(role) => Html(html::login(role, next, None)).into_response(),
        // Callers only pass pre-login screens; fall back to the dashboard.
        Screen::App { .. } => Redirect::to("/").into_response(),
    }
}

fn app_page(identity: &Identity, view: Option<View>, rendered: screens::Rendered) -> Response {
    (
        rendered.status,
        Html(html::shell(identity, view, rendered.title, &rendered.body)),
    )
        .into_response()
}

/// require_admin
///
/// Gate check for the administrator-only form posts. Unauthenticated sessions
/// get the gate page; interns get a 403 inside the shell.
fn require_admin(session: &Session, path: &str) -> Result<Identity, Response> {
    match gate::decide(session, path) {
        Screen::App { identity, .. } => match identity.role {
            Role::Administrator => Ok(identity),
            Role::Intern => {
                tracing::warn!(
                    user = %identity.username,
                    path,
                    "intern attempted an admin action"
                );
                let rendered = screens::Rendered {
                    status: AppError::Forbidden.status(),
                    title: "Forbidden",
                    body: format!(
                        "<section class=\"card\"><h1>403</h1><p>{}</p></section>",
                        AppError::Forbidden
                    ),
                };
                Err(app_page(&identity, None, rendered))
            }
        },
        screen => Err(gate_page(screen, path)),
    }
}

// --- Navigation ---

/// navigate
///
/// [Gated Route] Every GET navigation lands here. The route gate is consulted
/// first; the View Router only runs for authenticated sessions.
pub async fn navigate(
    active: ActiveSession,
    uri: Uri,
    query: Result<Query<ScreenQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let session = active.cell.lock().await;
    let next = request_target(&uri);

    match gate::decide(&session, uri.path()) {
        Screen::App { identity, view } => {
            if view == View::NotFound {
                tracing::warn!(path = %uri.path(), "404: attempted to access non-existent route");
            }
            let rendered = screens::render(view, &identity, &query, today());
            let active_view = (view != View::NotFound).then_some(view);
            app_page(&identity, active_view, rendered)
        }
        screen => gate_page(screen, next),
    }
}

// --- Session Form Actions ---

/// select_role_form
///
/// [Session Action] Records the role picked on the role-selection page.
pub async fn select_role_form(active: ActiveSession, Form(form): Form<RoleForm>) -> Response {
    let next = safe_next(&form.next);
    let mut session = active.cell.lock().await;

    let role = match form.role.parse::<Role>() {
        Ok(role) => role,
        Err(err) => {
            tracing::debug!(error = %err, "rejected role selection");
            // Only the role-selection page itself is re-rendered with the error status.
            return match gate::decide(&session, next) {
                Screen::RoleSelection => {
                    (err.status(), Html(html::role_selection(next))).into_response()
                }
                _ => Redirect::to(next).into_response(),
            };
        }
    };

    if let Err(err) = session.select_role(role) {
        tracing::debug!(error = %err, "role selection ignored");
    } else {
        tracing::debug!(session_id = %active.id, %role, "role selected");
    }
    Redirect::to(next).into_response()
}

/// back_form
///
/// [Session Action] Leaves the login form for role selection.
pub async fn back_form(active: ActiveSession, Form(form): Form<NextForm>) -> Response {
    let mut session = active.cell.lock().await;
    if let Err(err) = session.back() {
        tracing::debug!(error = %err, "back ignored");
    }
    Redirect::to(safe_next(&form.next)).into_response()
}

/// login_form
///
/// [Session Action] Signs in as the pending role. Failures re-render the login
/// form with a message; the session keeps its pending role.
pub async fn login_form(
    active: ActiveSession,
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = safe_next(&form.next);
    let mut session = active.cell.lock().await;

    match session
        .login(state.credentials.as_ref(), &form.username, &form.password)
        .await
    {
        Ok(identity) => {
            tracing::info!(
                session_id = %active.id,
                user = %identity.username,
                role = %identity.role,
                "login succeeded"
            );
            Redirect::to(next).into_response()
        }
        Err(err @ (AppError::InvalidCredentials | AppError::Backend(_))) => {
            let message = match &err {
                AppError::Backend(detail) => {
                    tracing::error!(session_id = %active.id, detail = %detail, "login error");
                    err.to_string()
                }
                _ => {
                    tracing::info!(session_id = %active.id, "login failed");
                    LOGIN_FAILED.to_string()
                }
            };
            match session.selected_role() {
                Some(role) => {
                    let page = html::login(role, next, Some(&message));
                    (err.status(), Html(page)).into_response()
                }
                None => Redirect::to(next).into_response(),
            }
        }
        Err(err) => {
            // No pending role, or already signed in: the gate decides what to show.
            tracing::debug!(error = %err, "login ignored");
            Redirect::to(next).into_response()
        }
    }
}

/// logout_form
///
/// [Session Action] Ends the session's identity and returns to role selection.
pub async fn logout_form(active: ActiveSession) -> Response {
    let mut session = active.cell.lock().await;
    if let Some(identity) = session.identity() {
        tracing::info!(session_id = %active.id, user = %identity.username, "logout");
    }
    session.logout();
    Redirect::to("/").into_response()
}

// --- Admin Form Posts ---

/// add_syllabus
///
/// [Admin Route] Validates a syllabus draft and renders the list with the new
/// week appended. Nothing is stored: the addition lives in this response only.
pub async fn add_syllabus(active: ActiveSession, Form(draft): Form<SyllabusDraft>) -> Response {
    let session = active.cell.lock().await;
    let identity = match require_admin(&session, View::Syllabus.path()) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let mut items = crate::fixtures::syllabus();
    let (status, body) = match draft.into_week(&items, today()) {
        Ok(week) => {
            tracing::info!(week = week.week, title = %week.title, "syllabus item added");
            let message = format!("Week {} added.", week.week);
            items.push(week);
            (StatusCode::OK, screens::syllabus::admin(&items, Some(Ok(&message))))
        }
        Err(err) => {
            let message = err.to_string();
            (err.status(), screens::syllabus::admin(&items, Some(Err(&message))))
        }
    };

    let rendered = screens::Rendered {
        status,
        title: "Syllabus",
        body,
    };
    app_page(&identity, Some(View::Syllabus), rendered)
}

/// add_tool
///
/// [Admin Route] Validates a tool draft and renders the catalog with the new
/// tool appended, for this response only.
pub async fn add_tool(active: ActiveSession, Form(draft): Form<ToolDraft>) -> Response {
    let session = active.cell.lock().await;
    let identity = match require_admin(&session, View::Tools.path()) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let mut catalog = crate::fixtures::tools();
    let (status, body) = match draft.into_tool(&catalog) {
        Ok(tool) => {
            tracing::info!(tool = %tool.name, id = tool.id, "tool added");
            let message = format!("{} added.", tool.name);
            catalog.push(tool);
            (StatusCode::OK, screens::tools::admin(&catalog, Some(Ok(&message))))
        }
        Err(err) => {
            let message = err.to_string();
            (err.status(), screens::tools::admin(&catalog, Some(Err(&message))))
        }
    };

    let rendered = screens::Rendered {
        status,
        title: "Tools",
        body,
    };
    app_page(&identity, Some(View::Tools), rendered)
}

// --- JSON API ---

/// get_session
///
/// [API] Reports the calling session's gate state.
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Current session", body = SessionView))
)]
pub async fn get_session(active: ActiveSession) -> Json<SessionView> {
    Json(active.cell.lock().await.view())
}

/// select_role
///
/// [API] Chooses the role to sign in as. Idempotent.
#[utoipa::path(
    post,
    path = "/api/session/role",
    request_body = SelectRoleRequest,
    responses(
        (status = 200, description = "Role chosen", body = SessionView),
        (status = 409, description = "Already signed in", body = models::ErrorResponse)
    )
)]
pub async fn select_role(
    active: ActiveSession,
    ApiJson(payload): ApiJson<SelectRoleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = active.cell.lock().await;
    session.select_role(payload.role)?;
    Ok(Json(session.view()))
}

/// leave_login
///
/// [API] Clears the pending role selection.
#[utoipa::path(
    post,
    path = "/api/session/back",
    responses(
        (status = 200, description = "Back at role selection", body = SessionView),
        (status = 409, description = "Already signed in", body = models::ErrorResponse)
    )
)]
pub async fn leave_login(active: ActiveSession) -> Result<Json<SessionView>, AppError> {
    let mut session = active.cell.lock().await;
    session.back()?;
    Ok(Json(session.view()))
}

/// login
///
/// [API] Signs in as the pending role.
#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = Identity),
        (status = 401, description = "Invalid credentials", body = models::ErrorResponse),
        (status = 409, description = "No role chosen or already signed in", body = models::ErrorResponse),
        (status = 500, description = "Credential backend failure", body = models::ErrorResponse)
    )
)]
pub async fn login(
    active: ActiveSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<Identity>, AppError> {
    let mut session = active.cell.lock().await;
    let identity = session
        .login(state.credentials.as_ref(), &payload.username, &payload.password)
        .await?;
    tracing::info!(session_id = %active.id, user = %identity.username, "api login succeeded");
    Ok(Json(identity))
}

/// logout
///
/// [API] Returns the session to its initial state. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/session/logout",
    responses((status = 200, description = "Signed out", body = SessionView))
)]
pub async fn logout(active: ActiveSession) -> Json<SessionView> {
    let mut session = active.cell.lock().await;
    session.logout();
    Json(session.view())
}

/// resolve_route
///
/// [API] Reports what a navigation to `path` would render for this session.
#[utoipa::path(
    get,
    path = "/api/route",
    params(RouteQuery),
    responses((status = 200, description = "Gate decision", body = RouteResolution))
)]
pub async fn resolve_route(
    active: ActiveSession,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResolution> {
    let path = query.path.unwrap_or_else(|| "/".to_string());
    let session = active.cell.lock().await;
    Json(gate::resolve_route(&session, &path))
}
