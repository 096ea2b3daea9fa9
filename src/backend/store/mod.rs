//! Storage Module
//!
//! Persistence sits behind two traits so the auth core and the handlers never
//! see SQL:
//!
//! - **`UserStore`** - account lookup, registration and deletion
//! - **`ProfileStore`** - profile picture and employer / job-seeker details
//!
//! Two implementations are provided:
//!
//! - **`postgres::PgStore`** - PostgreSQL through `sqlx`
//! - **`memory::MemoryStore`** - in-process maps, used when no database is
//!   configured and by the test suite
//!
//! Both enforce the same rules: names and emails are unique across all
//! accounts (deleted ones included), identifiers are never reused, and hard
//! deletion removes the account's profile details with it.

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::auth::users::{NewUser, User, UserFilter, UserId, UserSummary};
use crate::backend::profiles::models::{EmployerDetails, JobseekerDetails};

/// PostgreSQL implementation
pub mod postgres;

/// In-memory implementation
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique account field is already taken
    #[error("duplicate {field}")]
    Duplicate { field: &'static str },

    /// A one-per-account record already exists
    #[error("{what} already exists")]
    AlreadyExists { what: &'static str },

    /// The owning account does not exist
    #[error("no user with id {id}")]
    UserNotFound { id: UserId },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back into a domain value
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Account persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Insert an account; fails with [`StoreError::Duplicate`] when the name
    /// or email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// List accounts ordered by id
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserSummary>, StoreError>;

    /// Flag an active account as deleted. Returns `false` when there is no
    /// active account with that id.
    async fn soft_delete_user(&self, id: UserId) -> Result<bool, StoreError>;

    /// Remove an account and its profile details. Returns `false` when the
    /// account does not exist.
    async fn hard_delete_user(&self, id: UserId) -> Result<bool, StoreError>;
}

/// Profile persistence
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Set or clear the profile picture URL. Returns `false` when the account
    /// does not exist.
    async fn set_profile_picture(&self, user_id: UserId, url: Option<&str>)
        -> Result<bool, StoreError>;

    async fn employer_details(&self, user_id: UserId)
        -> Result<Option<EmployerDetails>, StoreError>;

    /// Fails with [`StoreError::AlreadyExists`] if details were created before
    /// and with [`StoreError::UserNotFound`] if the account is gone
    async fn insert_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<(), StoreError>;

    /// Returns `false` when no details exist yet
    async fn update_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<bool, StoreError>;

    async fn jobseeker_details(&self, user_id: UserId)
        -> Result<Option<JobseekerDetails>, StoreError>;

    async fn insert_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<(), StoreError>;

    async fn update_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<bool, StoreError>;
}
