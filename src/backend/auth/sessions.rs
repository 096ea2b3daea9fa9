/**
 * Identity Tokens
 *
 * HS256 JWTs carrying the account id and role. The token is the whole
 * session: nothing is stored server-side, so verification needs only the
 * signing key and the clock.
 *
 * Every verification failure collapses into `BackendError::InvalidToken`;
 * the reason is logged at debug level and never returned.
 */

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::identity::Identity;
use crate::backend::auth::users::{User, UserId};
use crate::backend::error::BackendError;
use crate::shared::{ConfigError, Role};

/// Token lifetime in hours
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Role at issuance
    pub role: Role,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Issues and verifies identity tokens with one process-wide key
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build the service from a signing secret.
    ///
    /// An empty secret is a configuration error and should stop startup.
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        })
    }

    /// Issue a token for a verified account
    pub fn issue(&self, user: &User) -> Result<String, BackendError> {
        self.issue_at(user.id, user.role, Utc::now())
    }

    /// Issue a token as if it were `issued_at`; expiry is `issued_at + 24h`
    pub fn issue_at(
        &self,
        user_id: UserId,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, BackendError> {
        let iat = issued_at.timestamp().max(0) as u64;
        let exp = (issued_at + self.ttl).timestamp().max(0) as u64;

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| BackendError::internal(format!("token signing failed: {}", e)))
    }

    /// Verify a token and return the identity it asserts
    pub fn verify(&self, token: &str) -> Result<Identity, BackendError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            BackendError::InvalidToken
        })?;

        let user_id = data.claims.sub.parse::<UserId>().map_err(|e| {
            tracing::debug!("Token subject is not a user id: {}", e);
            BackendError::InvalidToken
        })?;

        Ok(Identity::new(user_id, data.claims.role))
    }
}
