//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - bearer token verification, the admin gate and the
//!   `AuthUser` extractor
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware;
//! use jobboard::backend::middleware::{auth_middleware, require_admin};
//!
//! let admin = Router::new()
//!     .route("/api/auth/user/hard/{id}", delete(hard_delete_user))
//!     .route_layer(middleware::from_fn(require_admin));
//! let protected = Router::new()
//!     .merge(admin)
//!     .route_layer(middleware::from_fn_with_state(state, auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, require_admin, AuthUser};
