use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const MSG_VALIDATION: &str = "Email and password are required";
pub const MSG_DUPLICATE: &str = "Email already in use";
pub const MSG_PROCESSING: &str = "Password hashing failed";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Errors returned by [`super::CredentialService`].
///
/// Every login failure collapses into `InvalidCredentials` so callers cannot
/// tell an unknown email from a wrong password or a corrupt row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{}", MSG_VALIDATION)]
    Validation,
    #[error("{}", MSG_DUPLICATE)]
    DuplicateIdentifier,
    #[error("{}", MSG_PROCESSING)]
    CredentialProcessing,
    #[error("{}", MSG_INVALID_CREDENTIALS)]
    InvalidCredentials,
    #[error("{0}")]
    Storage(String),
}

impl CredentialError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation | Self::DuplicateIdentifier => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::CredentialProcessing | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.to_string())
    }
}
