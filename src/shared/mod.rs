//! Shared Module
//!
//! Types that are not tied to HTTP or storage: account roles, input
//! validation errors and the application configuration. Both the auth core
//! and the request handlers build on these.

/// Account roles
pub mod role;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use role::Role;
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, CloudinaryConfig, ConfigError, RoleSource};
