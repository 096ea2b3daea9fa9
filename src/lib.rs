//! Job Board - Backend Library
//!
//! Backend for a job-listing platform: registration and login with
//! role-based access (`admin`, `employer`, `jobseeker`), soft and hard
//! account deletion, and profile management with hosted profile pictures.
//!
//! # Module Structure
//!
//! - **`shared`** - roles, validation errors and application configuration
//! - **`backend`** - the Axum server, auth core, profiles and storage
//!
//! # Usage
//!
//! ```rust,no_run
//! use jobboard::backend::server::create_app;
//! use jobboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Authentication
//!
//! Login returns an HS256 JWT valid for 24 hours. Protected routes expect it
//! as `Authorization: Bearer <token>`. See [`backend::auth`].

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
