/**
 * In-Memory Store
 *
 * Keeps accounts and profile details in process memory behind a single
 * `tokio::sync::RwLock`. The server falls back to it when `DATABASE_URL`
 * is not set; data is lost on restart.
 */

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::auth::users::{NewUser, User, UserFilter, UserId, UserSummary};
use crate::backend::profiles::models::{EmployerDetails, JobseekerDetails};
use crate::backend::store::{ProfileStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct MemoryState {
    /// Last issued id; ids are never reused, even after hard deletion
    last_id: UserId,
    users: BTreeMap<UserId, User>,
    employers: HashMap<UserId, EmployerDetails>,
    jobseekers: HashMap<UserId, JobseekerDetails>,
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, deleted ones included
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.name == name).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }
        if state.users.values().any(|u| u.name == user.name) {
            return Err(StoreError::Duplicate { field: "name" });
        }

        state.last_id += 1;
        let record = User {
            id: state.last_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_deleted: false,
            profile_picture: None,
            created_at: Utc::now(),
        };
        state.users.insert(record.id, record.clone());

        Ok(record)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserSummary>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| filter.matches(u))
            .map(UserSummary::from)
            .collect())
    }

    async fn soft_delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(user) if !user.is_deleted => {
                user.is_deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn hard_delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.employers.remove(&id);
            state.jobseekers.remove(&id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn set_profile_picture(
        &self,
        user_id: UserId,
        url: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user_id) {
            Some(user) => {
                user.profile_picture = url.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn employer_details(
        &self,
        user_id: UserId,
    ) -> Result<Option<EmployerDetails>, StoreError> {
        Ok(self.state.read().await.employers.get(&user_id).cloned())
    }

    async fn insert_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound { id: user_id });
        }
        if state.employers.contains_key(&user_id) {
            return Err(StoreError::AlreadyExists { what: "Employer details" });
        }
        state.employers.insert(user_id, details.clone());
        Ok(())
    }

    async fn update_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.employers.get_mut(&user_id) {
            Some(existing) => {
                *existing = details.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn jobseeker_details(
        &self,
        user_id: UserId,
    ) -> Result<Option<JobseekerDetails>, StoreError> {
        Ok(self.state.read().await.jobseekers.get(&user_id).cloned())
    }

    async fn insert_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound { id: user_id });
        }
        if state.jobseekers.contains_key(&user_id) {
            return Err(StoreError::AlreadyExists { what: "Job seeker details" });
        }
        state.jobseekers.insert(user_id, details.clone());
        Ok(())
    }

    async fn update_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.jobseekers.get_mut(&user_id) {
            Some(existing) => {
                *existing = details.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
