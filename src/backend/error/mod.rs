//! Backend Error Module
//!
//! Error types returned by handlers and the auth core. Every variant maps to
//! one HTTP status code and a client-safe message.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and status mapping
//! └── conversion.rs - IntoResponse and From impls for lower-layer errors
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use jobboard::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::not_found("User not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, INTERNAL_MESSAGE};

/// Result alias used throughout the backend
pub type BackendResult<T> = Result<T, BackendError>;
