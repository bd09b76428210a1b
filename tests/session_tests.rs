use axum::http::{HeaderMap, HeaderValue, header};
use intern_portal::{
    AppError, MockCredentials, StaticCredentials,
    auth::{self, DEMO_PASSWORD},
    models::{Role, SessionStateKind},
    session::{
        GateState, InMemorySessionStore, Session, SessionId, SessionStore, session_cookie,
        session_id_from_headers,
    },
};
use std::time::Duration;

// --- Credential Check ---

#[test]
fn test_credentials_accept_role_username_and_demo_password() {
    for role in Role::ALL {
        let identity = auth::check_credentials(role.as_str(), DEMO_PASSWORD, role)
            .expect("demo credentials should be accepted");
        assert_eq!(identity.role, role);
        assert_eq!(identity.username, role.as_str());
    }
}

#[test]
fn test_credentials_bind_to_claimed_role() {
    // Intern credentials presented for the administrator role.
    assert!(auth::check_credentials("intern", "password", Role::Administrator).is_none());
    assert!(auth::check_credentials("administrator", "password", Role::Intern).is_none());
}

#[test]
fn test_credentials_are_case_sensitive() {
    assert!(auth::check_credentials("Administrator", "password", Role::Administrator).is_none());
    assert!(auth::check_credentials("intern", "Password", Role::Intern).is_none());
    assert!(auth::check_credentials("", "", Role::Intern).is_none());
}

#[test]
fn test_fixed_identities() {
    let admin = auth::identity_for(Role::Administrator);
    assert_eq!(admin.id, "1");
    assert_eq!(admin.name, "John Smith");

    let intern = auth::identity_for(Role::Intern);
    assert_eq!(intern.id, "2");
    assert_eq!(intern.name, "Sarah Johnson");
}

#[test]
fn test_role_parsing() {
    assert_eq!("administrator".parse::<Role>(), Ok(Role::Administrator));
    assert_eq!("admin".parse::<Role>(), Ok(Role::Administrator));
    assert_eq!("intern".parse::<Role>(), Ok(Role::Intern));
    assert_eq!(
        "mentor".parse::<Role>(),
        Err(AppError::InvalidRole("mentor".to_string()))
    );
}

#[test]
fn test_role_wire_form() {
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Administrator);
    assert_eq!(serde_json::to_string(&role).unwrap(), "\"administrator\"");
    assert!(serde_json::from_str::<Role>("\"mentor\"").is_err());
}

// --- Session State Machine ---

#[test]
fn test_new_session_has_no_role() {
    let session = Session::new();
    assert_eq!(session.state(), GateState::NoRole);
    assert!(!session.is_authenticated());
    assert_eq!(session.view().state, SessionStateKind::NoRole);
}

#[test]
fn test_select_role_is_idempotent_and_replaceable() {
    let mut session = Session::new();
    session.select_role(Role::Intern).unwrap();
    session.select_role(Role::Intern).unwrap();
    assert_eq!(session.state(), GateState::RoleChosen(Role::Intern));

    session.select_role(Role::Administrator).unwrap();
    assert_eq!(session.selected_role(), Some(Role::Administrator));
}

#[test]
fn test_back_clears_selection() {
    let mut session = Session::new();
    session.select_role(Role::Administrator).unwrap();
    session.back().unwrap();
    assert_eq!(session.state(), GateState::NoRole);

    // Already at role selection: still fine.
    session.back().unwrap();
    assert_eq!(session.state(), GateState::NoRole);
}

#[tokio::test]
async fn test_login_success_installs_identity_and_clears_selection() {
    let mut session = Session::new();
    session.select_role(Role::Administrator).unwrap();

    let identity = session
        .login(&StaticCredentials, "administrator", "password")
        .await
        .unwrap();

    assert_eq!(identity.name, "John Smith");
    assert_eq!(session.state(), GateState::Authenticated(identity.clone()));
    assert_eq!(session.selected_role(), None);
    assert_eq!(session.identity(), Some(&identity));
}

#[tokio::test]
async fn test_login_failure_keeps_pending_role() {
    let mut session = Session::new();
    session.select_role(Role::Intern).unwrap();
    let before = session.clone();

    let err = session
        .login(&StaticCredentials, "intern", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, AppError::InvalidCredentials);
    assert_eq!(session, before);
}

#[tokio::test]
async fn test_login_without_role_is_rejected() {
    let mut session = Session::new();
    let err = session
        .login(&StaticCredentials, "intern", "password")
        .await
        .unwrap_err();
    assert_eq!(err, AppError::NoRoleSelected);
    assert_eq!(session.state(), GateState::NoRole);
}

#[tokio::test]
async fn test_authenticated_session_rejects_pre_login_actions() {
    let mut session = Session::new();
    session.select_role(Role::Intern).unwrap();
    session
        .login(&StaticCredentials, "intern", "password")
        .await
        .unwrap();
    let before = session.clone();

    assert_eq!(session.select_role(Role::Administrator), Err(AppError::AlreadyAuthenticated));
    assert_eq!(session.back(), Err(AppError::AlreadyAuthenticated));
    assert_eq!(
        session.login(&StaticCredentials, "intern", "password").await,
        Err(AppError::AlreadyAuthenticated)
    );
    assert_eq!(session, before);
}

#[tokio::test]
async fn test_logout_returns_to_initial_state() {
    let mut session = Session::new();
    session.logout();
    assert_eq!(session, Session::new());

    session.select_role(Role::Administrator).unwrap();
    session
        .login(&StaticCredentials, "administrator", "password")
        .await
        .unwrap();
    session.logout();
    assert_eq!(session, Session::new());
}

#[tokio::test]
async fn test_backend_failure_leaves_session_untouched() {
    let mut session = Session::new();
    session.select_role(Role::Administrator).unwrap();
    let before = session.clone();

    let err = session
        .login(&MockCredentials::new_failing(), "administrator", "password")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Backend(_)));
    assert_eq!(err.to_string(), "Something went wrong. Please try again.");
    assert_eq!(session, before);
}

#[tokio::test]
async fn test_mock_credentials_behave_like_static_when_healthy() {
    let mut session = Session::new();
    session.select_role(Role::Intern).unwrap();
    let identity = session
        .login(&MockCredentials::new(), "intern", "password")
        .await
        .unwrap();
    assert_eq!(identity, auth::identity_for(Role::Intern));
}

// --- Session Cookie ---

#[test]
fn test_session_id_cookie_parsing() {
    let id = SessionId::generate();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("theme=dark; portal_session={id}; other=1")).unwrap(),
    );

    assert_eq!(session_id_from_headers(&headers, "portal_session"), Some(id));
    assert_eq!(session_id_from_headers(&headers, "missing"), None);
}

#[test]
fn test_malformed_session_cookie_is_ignored() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("portal_session=not-a-uuid"));
    assert_eq!(session_id_from_headers(&headers, "portal_session"), None);
}

#[test]
fn test_session_cookie_attributes() {
    let id = SessionId::generate();
    let local = session_cookie("portal_session", id, false);
    assert_eq!(local, format!("portal_session={id}; Path=/; HttpOnly; SameSite=Lax"));

    let production = session_cookie("portal_session", id, true);
    assert!(production.ends_with("; Secure"));
}

// --- Session Store ---

#[tokio::test]
async fn test_store_issues_independent_sessions() {
    let store = InMemorySessionStore::new(Duration::from_secs(60));
    let (first_id, first) = store.create().await;
    let (second_id, _) = store.create().await;
    assert_ne!(first_id, second_id);
    assert_eq!(store.len().await, 2);

    first.lock().await.select_role(Role::Intern).unwrap();

    let reloaded = store.get(first_id).await.expect("session should be live");
    assert_eq!(reloaded.lock().await.selected_role(), Some(Role::Intern));

    let other = store.get(second_id).await.expect("session should be live");
    assert_eq!(other.lock().await.selected_role(), None);
}

#[tokio::test]
async fn test_store_unknown_id() {
    let store = InMemorySessionStore::new(Duration::from_secs(60));
    assert!(store.get(SessionId::generate()).await.is_none());
}

#[tokio::test]
async fn test_store_expires_idle_sessions() {
    let store = InMemorySessionStore::new(Duration::from_millis(20));
    let (id, _) = store.create().await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(store.get(id).await.is_none());
    assert_eq!(store.len().await, 0);
}
