/**
 * Server Configuration
 *
 * Builds the collaborators described by `AppConfig`: the PostgreSQL store
 * and the image host. Both are optional.
 *
 * - No `DATABASE_URL`: the server runs on the in-memory store
 * - No `CLOUDINARY_URL`: profile picture uploads answer 503
 *
 * A database that is configured but unreachable, or whose migrations fail,
 * stops startup instead of silently falling back to memory.
 */

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::backend::media::{CloudinaryHost, DisabledImageHost, ImageHost, ImageHostError};
use crate::backend::store::PgStore;
use crate::shared::{AppConfig, ConfigError};

/// Errors that abort server startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("image host setup failed: {0}")]
    ImageHost(#[from] ImageHostError),
}

/// Connect to PostgreSQL and apply migrations
///
/// Returns `Ok(None)` when no database URL is configured.
pub async fn load_database(database_url: Option<&str>) -> Result<Option<PgStore>, StartupError> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not survive a restart.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {}", e);
            e
        })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Some(PgStore::new(pool)))
}

/// Build the image host from configuration
pub fn load_image_host(config: &AppConfig) -> Result<Arc<dyn ImageHost>, StartupError> {
    match &config.cloudinary {
        Some(cloudinary) => {
            tracing::info!(
                "Profile pictures go to Cloudinary cloud '{}', folder '{}'",
                cloudinary.cloud_name,
                cloudinary.folder
            );
            Ok(Arc::new(CloudinaryHost::new(cloudinary.clone())?))
        }
        None => {
            tracing::warn!("CLOUDINARY_URL not set. Profile picture uploads are disabled.");
            Ok(Arc::new(DisabledImageHost))
        }
    }
}
