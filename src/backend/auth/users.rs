/**
 * User Model
 *
 * The account record and the views of it that leave the server. Storage
 * operations live behind the `UserStore` trait in `backend::store`.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::Role;

/// Numeric user identifier, assigned by the store and never reused
pub type UserId = i64;

/// User account as stored
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    /// Display name (unique)
    pub name: String,
    /// Email address (unique, stored lowercase)
    pub email: String,
    /// bcrypt hash; the cleartext password is never stored
    pub password_hash: String,
    pub role: Role,
    /// Soft-deletion flag
    pub is_deleted: bool,
    /// Hosted profile picture URL
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("is_deleted", &self.is_deleted)
            .field("profile_picture", &self.profile_picture)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// Whether the account shows up in "active" views
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Data needed to insert a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Which accounts a listing or lookup should include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFilter {
    /// Active and soft-deleted
    All,
    /// `is_deleted = false`
    Active,
    /// `is_deleted = true`
    Inactive,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Active => !user.is_deleted,
            UserFilter::Inactive => user.is_deleted,
        }
    }
}

/// User view without sensitive data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_deleted: user.is_deleted,
            created_at: user.created_at,
        }
    }
}
