//! Shared Error Types
//!
//! This module defines errors raised while interpreting client input, before
//! any storage or crypto work happens. The backend turns them into
//! `400 Bad Request` responses.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field is missing, empty, or out of range
//!
//! # Usage
//!
//! ```rust
//! use jobboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! ```
use thiserror::Error;

/// Input errors shared by every request type
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for returning to the client
    pub fn client_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
        }
    }
}

/// Require a non-blank string field, returning it trimmed.
pub fn require_field(field: &'static str, value: Option<&str>) -> Result<String, SharedError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SharedError::validation(field, format!("{} is required", field))),
    }
}

/// Normalize an optional text field: blank strings become `None`.
pub fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
