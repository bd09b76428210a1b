use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{errors::AppError, views::View};

// --- Identity Schemas ---

/// Role
///
/// The two capability sets of the portal. Every screen matches on this
/// exhaustively. The serialized form is the canonical login username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    /// `admin` is accepted on input, matching [`Role::from_str`].
    #[serde(alias = "admin")]
    Administrator,
    Intern,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Administrator, Role::Intern];

    /// The canonical string form. The credential check compares usernames
    /// against exactly this value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Intern => "intern",
        }
    }

    /// Capitalized form for display.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Accepts the canonical forms plus the short `admin` alias used by older
    /// role-selection links. Matching is case-sensitive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "administrator" | "admin" => Ok(Role::Administrator),
            "intern" => Ok(Role::Intern),
            other => Err(AppError::InvalidRole(other.to_string())),
        }
    }
}

/// Identity
///
/// The authenticated user record. Only ever produced by a successful credential
/// check and never mutated while the session lasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub name: String,
}

// --- Session Schemas (Output) ---

/// SessionStateKind
///
/// Wire name of the gate state a session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStateKind {
    NoRole,
    RoleChosen,
    Authenticated,
}

/// SessionView
///
/// Output schema for `GET /api/session` and every session transition endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionView {
    pub state: SessionStateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

/// GateScreen
///
/// The top-level screen the route gate picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GateScreen {
    RoleSelection,
    Login,
    App,
}

/// RouteResolution
///
/// Output schema for `GET /api/route`: what a navigation to `path` would render
/// for the calling session. `view` is only present when the gate opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteResolution {
    pub path: String,
    pub gate: GateScreen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
}

// --- Request Payloads (Input Schemas) ---

/// SelectRoleRequest
///
/// Input payload for `POST /api/session/role`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SelectRoleRequest {
    pub role: Role,
}

/// LoginRequest
///
/// Input payload for `POST /api/session/login`. The role is taken from the
/// session's pending selection, not from the payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// ErrorResponse
///
/// Body of every JSON error response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
