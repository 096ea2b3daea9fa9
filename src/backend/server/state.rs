/**
 * Application State Management
 *
 * `AppState` holds the long-lived collaborators every handler may need.
 * Everything inside is read-only after startup and shared through `Arc`,
 * so cloning the state per request is cheap.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers ask only for what they use:
 *
 * ```rust,ignore
 * async fn handler(State(users): State<Arc<dyn UserStore>>) { ... }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::credentials::PasswordHasher;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenService;
use crate::backend::media::ImageHost;
use crate::backend::store::{ProfileStore, UserStore};
use crate::shared::{AppConfig, ConfigError, RoleSource};

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth: AuthService,

    /// Token verification for the auth middleware
    pub tokens: Arc<TokenService>,

    pub users: Arc<dyn UserStore>,

    pub profiles: Arc<dyn ProfileStore>,

    /// Profile picture storage; disabled when not configured
    pub images: Arc<dyn ImageHost>,

    /// Where the auth middleware takes the caller's role from
    pub role_source: RoleSource,
}

impl AppState {
    /// Wire the state from configuration and a store implementing both
    /// storage traits.
    pub fn new<S>(
        config: &AppConfig,
        store: Arc<S>,
        images: Arc<dyn ImageHost>,
    ) -> Result<Self, ConfigError>
    where
        S: UserStore + ProfileStore + 'static,
    {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret)?);
        let users: Arc<dyn UserStore> = store.clone();
        let profiles: Arc<dyn ProfileStore> = store;

        let auth = AuthService::new(
            users.clone(),
            PasswordHasher::new(config.bcrypt_cost),
            tokens.clone(),
        );

        Ok(Self {
            auth,
            tokens,
            users,
            profiles,
            images,
            role_source: config.role_source,
        })
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ProfileStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.profiles.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ImageHost> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}
