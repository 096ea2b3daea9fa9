/**
 * Credential Verification
 *
 * Password hashing with bcrypt and the email-or-name identifier lookup used
 * at login.
 *
 * bcrypt is CPU-bound by design, so the async entry points move the work onto
 * tokio's blocking pool instead of stalling a request worker.
 */

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::store::{StoreError, UserStore};

/// Salted, work-factor-tunable password hashing
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password. Every call uses a fresh salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, BackendError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| BackendError::internal(format!("password hashing failed: {}", e)))
    }

    /// Compare a password with a stored hash.
    ///
    /// A mismatch is `Ok(false)`. Only a stored value that is not a bcrypt
    /// hash at all is an error.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, BackendError> {
        bcrypt::verify(plaintext, hash)
            .map_err(|e| BackendError::internal(format!("stored password hash unreadable: {}", e)))
    }

    /// [`hash`](Self::hash) on the blocking pool
    pub async fn hash_async(&self, plaintext: String) -> Result<String, BackendError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn verify_async(&self, plaintext: String, hash: String) -> Result<bool, BackendError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| BackendError::internal(format!("verification task failed: {}", e)))?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

/// Resolve a login identifier to an account.
///
/// The identifier is tried as an email first (emails are stored lowercase),
/// then as a display name. The first match wins; nothing is merged.
pub async fn find_by_identifier(
    store: &dyn UserStore,
    identifier: &str,
) -> Result<Option<User>, StoreError> {
    let identifier = identifier.trim();

    if let Some(user) = store.find_by_email(&identifier.to_lowercase()).await? {
        return Ok(Some(user));
    }

    store.find_by_name(identifier).await
}
