//! Routes Module
//!
//! - **`router`** - final router assembly (`create_router`)
//! - **`api_routes`** - `/api/auth` and `/api/users` route tables

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use api_routes::configure_api_routes;
pub use router::create_router;
