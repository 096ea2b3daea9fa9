//! Backend Module
//!
//! All server-side code: the Axum HTTP server, authentication, profiles and
//! storage.
//!
//! # Architecture
//!
//! - **`server`** - application state, collaborator loading, app creation
//! - **`routes`** - route tables and router assembly
//! - **`auth`** - registration, login, tokens, role gates, account handlers
//! - **`profiles`** - profile, profile picture and role-specific details
//! - **`store`** - `UserStore` / `ProfileStore` with PostgreSQL and in-memory
//!   implementations
//! - **`media`** - external image host (Cloudinary)
//! - **`middleware`** - bearer token authentication and the admin gate
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and accounts
//! ├── profiles/       - Profile management
//! ├── store/          - Persistence
//! ├── media/          - Image host
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the token service, the auth service, both stores and the
//! image host, each behind an `Arc`. Nothing in it changes after startup; the
//! in-memory store is the only component with interior locking.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Profile management
pub mod profiles;

/// Persistence
pub mod store;

/// External image host
pub mod media;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::{create_app, AppState};
