/**
 * Authentication Service
 *
 * Registration and login on top of a `UserStore`, the password hasher and
 * the token service. Handlers stay thin; this is where the order of checks
 * lives.
 *
 * # Login
 *
 * 1. Resolve the identifier (email first, then name)
 * 2. Reject unknown and soft-deleted accounts
 * 3. Compare the password on the blocking pool
 * 4. Issue a token
 *
 * Steps 2 and 3 fail with the same `InvalidCredentials` error so callers
 * cannot tell which one tripped.
 */

use std::sync::Arc;

use crate::backend::auth::credentials::{find_by_identifier, PasswordHasher};
use crate::backend::auth::handlers::types::Registration;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{NewUser, User};
use crate::backend::error::BackendError;
use crate::backend::store::UserStore;

/// Registration and login
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account from a validated registration
    pub async fn register(&self, registration: Registration) -> Result<User, BackendError> {
        if self.store.find_by_email(&registration.email).await?.is_some() {
            tracing::warn!("Registration rejected: email already in use");
            return Err(BackendError::conflict("A user with this email already exists"));
        }
        if self.store.find_by_name(&registration.name).await?.is_some() {
            tracing::warn!("Registration rejected: name '{}' already in use", registration.name);
            return Err(BackendError::conflict("A user with this name already exists"));
        }

        let password_hash = self.hasher.hash_async(registration.password).await?;

        // A concurrent registration can still win the race; the store's
        // unique constraint turns that into the same conflict
        let user = self
            .store
            .insert_user(NewUser {
                name: registration.name,
                email: registration.email,
                password_hash,
                role: registration.role,
            })
            .await?;

        tracing::info!("User registered: id={} role={}", user.id, user.role);
        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, identifier: &str, password: String) -> Result<String, BackendError> {
        let user = find_by_identifier(self.store.as_ref(), identifier)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login failed: unknown identifier");
                BackendError::InvalidCredentials
            })?;

        if user.is_deleted {
            tracing::warn!("Login failed: account {} is deactivated", user.id);
            return Err(BackendError::InvalidCredentials);
        }

        let valid = self
            .hasher
            .verify_async(password, user.password_hash.clone())
            .await?;
        if !valid {
            tracing::warn!("Login failed: wrong password for account {}", user.id);
            return Err(BackendError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!("User logged in: id={}", user.id);
        Ok(token)
    }
}
