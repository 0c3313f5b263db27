//! Error codes shared across the service
//!
//! Every response, success or failure, carries one of these codes so
//! clients branch on the code rather than on HTTP semantics alone.

use http::StatusCode;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Authentication required (401)
    Unauthorized,
    /// Resource not found (404)
    NotFound,
    /// Uniqueness invariant violated (409)
    Conflict,
    /// State-machine precondition failed (422)
    InvalidTransition,
    /// Internal server error (500)
    Internal,
    /// Database error (500)
    Database,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Validation failed",
            Self::Unauthorized => "Authentication required",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Conflicting record exists",
            Self::InvalidTransition => "Invalid state transition",
            Self::Internal => "Internal server error",
            Self::Database => "Database error",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::Unauthorized => "E3001",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::InvalidTransition => "E0005",
            Self::Internal => "E9001",
            Self::Database => "E9002",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
