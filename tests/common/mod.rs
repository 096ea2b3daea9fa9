//! Common test utilities and helpers
//!
//! Shared by every integration test binary:
//! - An in-memory test app driven with `tower::ServiceExt::oneshot`
//! - Authentication helpers (register, login, bearer headers)
//! - A recording image host
//! - PostgreSQL fixtures, active only when `TEST_DATABASE_URL` is set
//! - Custom assertion macros

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;
pub mod database;
pub mod images;

pub use app::*;
pub use auth_helpers::*;
pub use images::*;
