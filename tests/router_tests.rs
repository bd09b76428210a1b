use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use intern_portal::{
    AppConfig, AppState, InMemorySessionStore, MockCredentials, StaticCredentials,
    auth::CredentialState, create_router, session::SessionStoreState,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;
use uuid::Uuid;

// --- Harness ---

fn test_app(credentials: CredentialState) -> Router {
    let state = AppState {
        sessions: Arc::new(InMemorySessionStore::new(Duration::from_secs(600)))
            as SessionStoreState,
        credentials,
        config: AppConfig::default(),
    };
    create_router(state)
}

fn app() -> Router {
    test_app(Arc::new(StaticCredentials))
}

fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(path: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// `name=value` part of the response's Set-Cookie, if one was issued.
fn issued_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Opens a session and returns its cookie.
async fn new_session(app: &Router) -> String {
    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    issued_cookie(&response).expect("first visit should issue a session cookie")
}

async fn sign_in(app: &Router, role: &str) -> String {
    let cookie = new_session(app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, &format!("role={role}&next=%2F")))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(post_form(
            "/session/login",
            &cookie,
            &format!("username={role}&password=password&next=%2F"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    cookie
}

// --- Tests ---

#[tokio::test]
async fn test_health_check_has_no_session() {
    let response = app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(issued_cookie(&response).is_none());
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_first_visit_shows_role_selection_and_issues_cookie() {
    let response = app().oneshot(get("/syllabus", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("portal_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(response.headers().contains_key("x-request-id"));

    let body = body_text(response).await;
    assert!(body.contains("Continue as Administrator"));
    assert!(body.contains("Continue as Intern"));
    assert!(!body.contains("Syllabus Management"));
}

#[tokio::test]
async fn test_full_login_flow_returns_to_requested_page() {
    let app = app();
    let cookie = new_session(&app).await;

    // Known session: no new cookie.
    let response = app.clone().oneshot(get("/syllabus", Some(&cookie))).await.unwrap();
    assert!(issued_cookie(&response).is_none());

    let response = app
        .clone()
        .oneshot(post_form("/session/role", &cookie, "role=administrator&next=%2Fsyllabus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/syllabus");

    let body = body_text(app.clone().oneshot(get("/syllabus", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Administrator Login"));
    assert!(body.contains("Username: administrator | Password: password"));

    let response = app
        .clone()
        .oneshot(post_form(
            "/session/login",
            &cookie,
            "username=administrator&password=password&next=%2Fsyllabus",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/syllabus");

    let response = app.clone().oneshot(get("/syllabus", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Syllabus Management"));
    assert!(body.contains("John Smith"));
    assert!(body.contains("IMS Admin"));
}

#[tokio::test]
async fn test_back_returns_to_role_selection() {
    let app = app();
    let cookie = new_session(&app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=intern&next=%2F"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/session/back", &cookie, "next=%2F"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_text(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Continue as Intern"));
}

#[tokio::test]
async fn test_wrong_password_keeps_login_form() {
    let app = app();
    let cookie = new_session(&app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=intern&next=%2F"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/session/login", &cookie, "username=intern&password=nope&next=%2F"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(response).await;
    assert!(body.contains("Invalid username or password"));
    assert!(body.contains("Intern Login"));

    // Pending role survives the failure.
    let body = body_text(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Intern Login"));
}

#[tokio::test]
async fn test_credentials_for_other_role_are_rejected() {
    let app = app();
    let cookie = new_session(&app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=administrator&next=%2F"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/session/login", &cookie, "username=intern&password=password"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let app = app();
    let cookie = new_session(&app).await;
    let response = app
        .clone()
        .oneshot(post_form("/session/role", &cookie, "role=mentor"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_role_keeps_pending_login() {
    let app = app();
    let cookie = new_session(&app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=intern&next=%2F"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/session/role", &cookie, "role=mentor&next=%2F"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_text(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Intern Login"));
}

#[tokio::test]
async fn test_unknown_route_after_login_is_not_found() {
    let app = app();
    let cookie = sign_in(&app, "intern").await;

    let response = app.clone().oneshot(get("/unknown", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Page Not Found"));
    assert!(body.contains("Sarah Johnson"));
}

#[tokio::test]
async fn test_unknown_route_before_login_shows_gate() {
    let response = app().oneshot(get("/unknown", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Continue as Administrator"));
}

#[tokio::test]
async fn test_paths_are_case_insensitive() {
    let app = app();
    let cookie = sign_in(&app, "intern").await;
    let response = app.clone().oneshot(get("/Roadmap/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Learning Roadmaps"));
}

#[tokio::test]
async fn test_logout_then_role_selection() {
    let app = app();
    let cookie = sign_in(&app, "administrator").await;

    let response = app.clone().oneshot(post_form("/session/logout", &cookie, "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = body_text(app.clone().oneshot(get("/tools", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Continue as Administrator"));
    assert!(!body.contains("Tools Management"));
}

#[tokio::test]
async fn test_role_selection_ignored_once_signed_in() {
    let app = app();
    let cookie = sign_in(&app, "intern").await;

    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=administrator&next=%2F"))
        .await
        .unwrap();

    let body = body_text(app.clone().oneshot(get("/", Some(&cookie))).await.unwrap()).await;
    assert!(body.contains("Welcome Back, Sarah Johnson!"));
}

#[tokio::test]
async fn test_redirect_target_must_be_local() {
    let app = app();
    let cookie = new_session(&app).await;
    let response = app
        .clone()
        .oneshot(post_form("/session/role", &cookie, "role=intern&next=%2F%2Fevil.example"))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_unknown_session_cookie_gets_fresh_session() {
    let stale = format!("portal_session={}", Uuid::new_v4());
    let response = app().oneshot(get("/", Some(&stale))).await.unwrap();
    let issued = issued_cookie(&response).expect("stale cookie should be replaced");
    assert_ne!(issued, stale);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = app();
    let signed_in = sign_in(&app, "administrator").await;
    let other = new_session(&app).await;

    let body = body_text(app.clone().oneshot(get("/", Some(&other))).await.unwrap()).await;
    assert!(body.contains("Continue as Administrator"));

    let body = body_text(app.clone().oneshot(get("/", Some(&signed_in))).await.unwrap()).await;
    assert!(body.contains("John Smith"));
}

#[tokio::test]
async fn test_intern_cannot_post_admin_forms() {
    let app = app();
    let cookie = sign_in(&app, "intern").await;

    let response = app
        .clone()
        .oneshot(post_form("/tools", &cookie, "name=Insomnia&url=https%3A%2F%2Finsomnia.rest"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(post_form("/syllabus", &cookie, "week=4&title=Extra"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_form_post_requires_sign_in() {
    let app = app();
    let cookie = new_session(&app).await;
    let response = app
        .clone()
        .oneshot(post_form("/tools", &cookie, "name=Insomnia&url=x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Continue as Administrator"));
}

#[tokio::test]
async fn test_admin_adds_tool_and_syllabus_week() {
    let app = app();
    let cookie = sign_in(&app, "administrator").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/tools",
            &cookie,
            "name=Insomnia&description=REST+client&category=API+Testing&url=https%3A%2F%2Finsomnia.rest&tags=api%2C+http",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Insomnia"));

    let response = app
        .clone()
        .oneshot(post_form("/syllabus", &cookie, "week=4&title=Advanced+React+Patterns"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Week 4: Advanced React Patterns"));

    // Additions are not kept.
    let body = body_text(app.clone().oneshot(get("/tools", Some(&cookie))).await.unwrap()).await;
    assert!(!body.contains("Insomnia"));
}

#[tokio::test]
async fn test_invalid_syllabus_draft_is_unprocessable() {
    let app = app();
    let cookie = sign_in(&app, "administrator").await;
    let response = app
        .clone()
        .oneshot(post_form("/syllabus", &cookie, "week=abc&title=Something"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Week number must be a positive whole number."));
}

#[tokio::test]
async fn test_attendance_toggle_via_query() {
    let app = app();
    let cookie = sign_in(&app, "administrator").await;
    let response = app
        .clone()
        .oneshot(get("/attendance?marks=1%2C2%2C3%2C4%2C5&date=2024-02-01", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("100%"));
    assert!(body.contains("Mark Attendance - 2/1/2024"));
}

#[tokio::test]
async fn test_malformed_query_is_ignored() {
    let app = app();
    let cookie = sign_in(&app, "intern").await;
    let response = app
        .clone()
        .oneshot(get("/roadmap?expand=abc", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_backend_failure_shows_generic_error() {
    let app = test_app(Arc::new(MockCredentials::new_failing()));
    let cookie = new_session(&app).await;
    app.clone()
        .oneshot(post_form("/session/role", &cookie, "role=administrator&next=%2F"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form(
            "/session/login",
            &cookie,
            "username=administrator&password=password",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("Something went wrong. Please try again."));
    assert!(!body.contains("Mock Credential Error"));
}
