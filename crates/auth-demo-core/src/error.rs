// Error types shared across the workspace.
//
// Failures from the database driver, the email provider and the payment
// provider are wrapped, not translated: the framework serving requests turns
// them into HTTP responses. `ApiError` is only produced by the policies this
// workspace encodes itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error codes for the policy rejections raised locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    AccountLinkingDisabled,
    ProviderNotTrusted,
    InvalidOrigin,
    NotAllowed,
    Unauthorized,
    InternalServerError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AccountLinkingDisabled => "Account linking is disabled",
            Self::ProviderNotTrusted => "Account not linked - provider is not trusted",
            Self::InvalidOrigin => "Invalid origin",
            Self::NotAllowed => "You are not allowed to perform this action",
            Self::Unauthorized => "Unauthorized",
            Self::InternalServerError => "Internal server error",
        };
        write!(f, "{msg}")
    }
}

/// HTTP status codes used by the API error system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpStatus {
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    InternalServerError = 500,
}

impl HttpStatus {
    pub fn status_code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_code())
    }
}

/// API error carrying an HTTP status, an error code, and a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status} {code}: {message}")]
pub struct ApiError {
    pub status: HttpStatus,
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: HttpStatus, code: ErrorCode) -> Self {
        Self {
            message: code.to_string(),
            status,
            code,
        }
    }

    pub fn unauthorized(code: ErrorCode) -> Self {
        Self::new(HttpStatus::Unauthorized, code)
    }

    pub fn forbidden(code: ErrorCode) -> Self {
        Self::new(HttpStatus::Forbidden, code)
    }

    /// JSON body for the error response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code,
            "message": self.message,
        })
    }
}

/// Failure reported by an `EmailSender`.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email transport failed: {0}")]
    Transport(String),

    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Internal (non-HTTP) error.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;
