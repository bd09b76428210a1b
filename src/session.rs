use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    auth::CredentialCheck,
    errors::AppError,
    models::{Identity, Role, SessionStateKind, SessionView},
};

// --- Session State Machine ---

/// GateState
///
/// The three mutually exclusive states a session can be in. Derived from the
/// session's fields, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    NoRole,
    RoleChosen(Role),
    Authenticated(Identity),
}

/// Session
///
/// Identity plus pending role selection. The fields are private so the only way
/// to install an Identity is a successful [`Session::login`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Identity>,
    selected_role: Option<Role>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        match (&self.identity, self.selected_role) {
            (Some(identity), _) => GateState::Authenticated(identity.clone()),
            (None, Some(role)) => GateState::RoleChosen(role),
            (None, None) => GateState::NoRole,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn selected_role(&self) -> Option<Role> {
        self.selected_role
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Chooses the role to sign in as. Re-selecting, including the same role,
    /// simply replaces the pending selection.
    pub fn select_role(&mut self, role: Role) -> Result<(), AppError> {
        if self.is_authenticated() {
            return Err(AppError::AlreadyAuthenticated);
        }
        self.selected_role = Some(role);
        Ok(())
    }

    /// Leaves the login form and returns to role selection. No-op when no role
    /// is pending.
    pub fn back(&mut self) -> Result<(), AppError> {
        if self.is_authenticated() {
            return Err(AppError::AlreadyAuthenticated);
        }
        self.selected_role = None;
        Ok(())
    }

    /// login
    ///
    /// Verifies the credentials against the pending role. On success the
    /// Identity is installed and the selection cleared; on any failure the
    /// session is left exactly as it was.
    pub async fn login(
        &mut self,
        credentials: &dyn CredentialCheck,
        username: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let role = match self.state() {
            GateState::Authenticated(_) => return Err(AppError::AlreadyAuthenticated),
            GateState::NoRole => return Err(AppError::NoRoleSelected),
            GateState::RoleChosen(role) => role,
        };

        match credentials.verify(username, password, role).await? {
            Some(identity) => {
                self.identity = Some(identity.clone());
                self.selected_role = None;
                Ok(identity)
            }
            None => Err(AppError::InvalidCredentials),
        }
    }

    /// Always returns the session to the initial state.
    pub fn logout(&mut self) {
        self.identity = None;
        self.selected_role = None;
    }

    pub fn view(&self) -> SessionView {
        let state = match self.state() {
            GateState::NoRole => SessionStateKind::NoRole,
            GateState::RoleChosen(_) => SessionStateKind::RoleChosen,
            GateState::Authenticated(_) => SessionStateKind::Authenticated,
        };
        SessionView {
            state,
            selected_role: self.selected_role,
            user: self.identity.clone(),
        }
    }
}

// --- Session Identity ---

/// SessionId
///
/// Opaque random key carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

/// session_id_from_headers
///
/// Finds the session cookie among all `Cookie` headers. Malformed values are
/// treated as absent.
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Builds the `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(cookie_name: &str, id: SessionId, secure: bool) -> String {
    let mut cookie = format!("{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

// --- Session Store ---

/// SharedSession
///
/// One session behind its own lock. A handler holds the lock for the whole
/// action, so each session has a single writer at a time.
pub type SharedSession = Arc<Mutex<Session>>;

/// SessionStore Contract
///
/// Owns every live session. The in-memory implementation is the only one the
/// portal ships; the trait keeps handlers independent of it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a new session in the initial state.
    async fn create(&self) -> (SessionId, SharedSession);

    /// Looks up a live session and marks it as recently used.
    async fn get(&self, id: SessionId) -> Option<SharedSession>;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}

struct SessionEntry {
    session: SharedSession,
    last_seen: Instant,
}

/// InMemorySessionStore
///
/// HashMap-backed store. Sessions idle for longer than `idle_timeout` are
/// dropped on lookup and purged whenever a new session is created.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> (SessionId, SharedSession) {
        let id = SessionId::generate();
        let session = Arc::new(Mutex::new(Session::new()));

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= self.idle_timeout);
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "purged idle sessions");
        }

        sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(session_id = %id, live = sessions.len(), "session created");

        (id, session)
    }

    async fn get(&self, id: SessionId) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let expired = match sessions.get_mut(&id) {
            None => return None,
            Some(entry) if entry.last_seen.elapsed() > self.idle_timeout => true,
            Some(entry) => {
                entry.last_seen = Instant::now();
                return Some(entry.session.clone());
            }
        };

        if expired {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "session expired");
        }
        None
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// SessionStoreState
///
/// The concrete type used to share the session store across the application state.
pub type SessionStoreState = Arc<dyn SessionStore>;

// --- Extractor ---

/// ActiveSession
///
/// The session bound to the current request. Inserted into the request
/// extensions by the session middleware and pulled out by handlers.
#[derive(Clone)]
pub struct ActiveSession {
    pub id: SessionId,
    pub cell: SharedSession,
}

impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActiveSession>()
            .cloned()
            .ok_or(AppError::SessionUnavailable)
    }
}
