use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// AppError
///
/// The single error type for session transitions, credential checks and form
/// handling. None of these are fatal: every variant leaves the session in the
/// state it held before the failing action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Choose a role before signing in.")]
    NoRoleSelected,
    #[error("Already signed in. Log out first.")]
    AlreadyAuthenticated,
    #[error("This action is not available for your role.")]
    Forbidden,
    #[error("Unknown role '{0}'.")]
    InvalidRole(String),
    #[error("{0}")]
    Validation(String),
    /// A JSON body that could not be read at all (syntax, content type).
    #[error("{0}")]
    MalformedRequest(String),
    /// An unexpected failure from the credential backend. The payload is for
    /// logs only; users see the generic message.
    #[error("Something went wrong. Please try again.")]
    Backend(String),
    #[error("Something went wrong. Please try again.")]
    SessionUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NoRoleSelected | AppError::AlreadyAuthenticated => StatusCode::CONFLICT,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidRole(_) | AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Backend(_) | AppError::SessionUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    /// Well-formed JSON of the wrong shape is a validation failure; anything
    /// unreadable is a malformed request.
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
            other => AppError::MalformedRequest(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Backend(detail) = &self {
            tracing::error!(detail = %detail, "credential backend failure");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
