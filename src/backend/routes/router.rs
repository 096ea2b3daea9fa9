/**
 * Router Configuration
 *
 * Combines the liveness route, the API routes, the 404 fallback and request
 * tracing into the final router.
 */

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Body of `GET /`
pub const LIVENESS_MESSAGE: &str = "Job Listing Backend is running";

/// Create the Axum router with all routes configured
///
/// 1. **Liveness**: `GET /` answers without authentication
/// 2. **API Routes**: `/api/auth/*` and `/api/users/*`
/// 3. **Fallback**: JSON 404 for unknown paths
/// 4. **Tracing**: one span per request via `TraceLayer`
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(|| async { LIVENESS_MESSAGE }));
    let router = configure_api_routes(router, app_state.clone());

    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
