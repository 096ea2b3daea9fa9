/**
 * Server Initialization
 *
 * Turns an `AppConfig` into a ready-to-serve router.
 *
 * # Initialization Process
 *
 * 1. Build the image host (Cloudinary or disabled)
 * 2. Connect the PostgreSQL store, or fall back to memory
 * 3. Assemble `AppState` (token service, hasher, auth service)
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_image_host, StartupError};
use crate::backend::server::state::AppState;
use crate::backend::store::MemoryStore;
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing job board backend");

    let images = load_image_host(&config)?;

    let state = match load_database(config.database_url.as_deref()).await? {
        Some(store) => AppState::new(&config, Arc::new(store), images)?,
        None => AppState::new(&config, Arc::new(MemoryStore::new()), images)?,
    };

    tracing::info!(
        "Auth configured: bcrypt cost {}, role source {:?}",
        config.bcrypt_cost,
        config.role_source
    );

    Ok(create_router(state))
}
