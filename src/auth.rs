use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    errors::AppError,
    models::{Identity, Role},
};

/// The single demo password shared by both fixed accounts.
pub const DEMO_PASSWORD: &str = "password";

/// identity_for
///
/// The fixed Identity record bound to each role.
pub fn identity_for(role: Role) -> Identity {
    let (id, name) = match role {
        Role::Administrator => ("1", "John Smith"),
        Role::Intern => ("2", "Sarah Johnson"),
    };

    Identity {
        id: id.to_string(),
        username: role.as_str().to_string(),
        role,
        name: name.to_string(),
    }
}

/// check_credentials
///
/// Succeeds iff `username` equals the claimed role's canonical string
/// (case-sensitive) and `password` equals [`DEMO_PASSWORD`]. No side effects:
/// installing the returned Identity is the caller's job.
pub fn check_credentials(username: &str, password: &str, role: Role) -> Option<Identity> {
    if username == role.as_str() && password == DEMO_PASSWORD {
        Some(identity_for(role))
    } else {
        None
    }
}

// 1. CredentialCheck Contract
/// CredentialCheck
///
/// The deferred seam in front of the credential check. Today's implementation
/// resolves immediately; a networked backend can replace it without touching
/// the session or the handlers.
///
/// `Ok(None)` is an ordinary rejected login. `Err` is reserved for unexpected
/// failures of the backend itself.
#[async_trait]
pub trait CredentialCheck: Send + Sync {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Identity>, AppError>;
}

// 2. The Real Implementation
/// StaticCredentials
///
/// Checks against the two in-memory demo accounts.
#[derive(Clone, Default)]
pub struct StaticCredentials;

#[async_trait]
impl CredentialCheck for StaticCredentials {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Identity>, AppError> {
        let outcome = check_credentials(username, password, role);
        tracing::debug!(%role, accepted = outcome.is_some(), "credential check");
        Ok(outcome)
    }
}

// 3. The Mock Implementation (For Tests)
/// MockCredentials
///
/// Behaves like [`StaticCredentials`] unless told to fail, in which case every
/// call reports a backend error. Lets tests drive the generic-error path.
#[derive(Clone, Default)]
pub struct MockCredentials {
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
}

impl MockCredentials {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl CredentialCheck for MockCredentials {
    async fn verify(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Identity>, AppError> {
        if self.should_fail {
            return Err(AppError::Backend(
                "Mock Credential Error: Simulation requested".to_string(),
            ));
        }
        Ok(check_credentials(username, password, role))
    }
}

/// CredentialState
///
/// The concrete type used to share the credential check across the application state.
pub type CredentialState = Arc<dyn CredentialCheck>;
