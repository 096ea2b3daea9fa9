//! Profiles Module
//!
//! Everything under `/api/users`: the caller's profile, the hosted profile
//! picture, and the role-specific employer / job-seeker details.
//!
//! - **`models`** - details, request bodies and response views
//! - **`handlers`** - HTTP handlers

/// Profile data types
pub mod models;

/// HTTP handlers for profile endpoints
pub mod handlers;

pub use models::{EmployerDetails, JobseekerDetails, UserProfile};
