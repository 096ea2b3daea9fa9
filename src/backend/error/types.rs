/**
 * Backend Error Types
 *
 * Every fallible operation in the backend ends in a `BackendError`. The
 * variants are the outward taxonomy clients can observe:
 *
 * - Validation     - 400, client input is missing or malformed
 * - Authentication - 401, collapsed into "invalid credentials",
 *                    "no token provided" or "invalid or expired token"
 * - Authorization  - 403, valid identity with the wrong role
 * - NotFound       - 404
 * - Conflict       - 409, duplicate registration or profile
 * - Unavailable    - 503, an optional collaborator is not configured
 * - Internal       - 500, detail is logged and never sent to the client
 */

use thiserror::Error;
use axum::http::StatusCode;

/// Message sent to clients for every internal failure
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use jobboard::backend::error::BackendError;
///
/// let err = BackendError::validation("email", "email is required");
/// let err = BackendError::forbidden("Access denied. Admins only.");
/// let err = BackendError::internal("connection reset by peer");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed client input
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// Offending field
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Unknown identifier or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization: Bearer ...` header on a protected route
    #[error("Unauthorized: No token provided")]
    MissingToken,

    /// Token is malformed, expired or forged
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but the role does not allow the operation
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate registration identifier or duplicate profile
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// A collaborator the request needs is not configured
    #[error("Service unavailable: {message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },

    /// Storage, hashing, signing or upstream failure
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the server log only
        message: String,
    },
}

impl BackendError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to return to the client
    ///
    /// Internal errors always yield [`INTERNAL_MESSAGE`]; the real detail is
    /// only available through `Display` for logging.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken => self.to_string(),
            Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Unavailable { message } => message.clone(),
            Self::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }
}
