/**
 * Account Management Handlers
 *
 * Listing, lookup and deletion of accounts under `/api/auth`. All of these
 * sit behind the auth middleware; hard deletion additionally sits behind
 * the admin gate.
 *
 * # Routes
 *
 * - `GET    /api/auth/users[/active|/inactive]`
 * - `GET    /api/auth/user[/active|/inactive]/{id}`
 * - `DELETE /api/auth/user/soft/{id}` - owner or admin
 * - `DELETE /api/auth/user/hard/{id}` - admin only
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::identity::require_self_or_admin;
use crate::backend::auth::users::{UserFilter, UserId, UserSummary};
use crate::backend::error::BackendError;
use crate::backend::media::{ImageHost, ImageHostError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::UserStore;

async fn list(store: &dyn UserStore, filter: UserFilter) -> Result<Json<Vec<UserSummary>>, BackendError> {
    Ok(Json(store.list_users(filter).await?))
}

async fn find(
    store: &dyn UserStore,
    id: UserId,
    filter: UserFilter,
    missing: &'static str,
) -> Result<Json<UserSummary>, BackendError> {
    store
        .find_by_id(id)
        .await?
        .filter(|user| filter.matches(user))
        .map(|user| Json(UserSummary::from(&user)))
        .ok_or_else(|| BackendError::not_found(missing))
}

/// GET /api/auth/users
pub async fn list_users(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    list(users.as_ref(), UserFilter::All).await
}

/// GET /api/auth/users/active
pub async fn list_active_users(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    list(users.as_ref(), UserFilter::Active).await
}

/// GET /api/auth/users/inactive
pub async fn list_inactive_users(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    list(users.as_ref(), UserFilter::Inactive).await
}

/// GET /api/auth/user/{id}
pub async fn get_user(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserSummary>, BackendError> {
    let Path(id) = id?;
    find(users.as_ref(), id, UserFilter::All, "User not found").await
}

/// GET /api/auth/user/active/{id}
pub async fn get_active_user(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserSummary>, BackendError> {
    let Path(id) = id?;
    find(users.as_ref(), id, UserFilter::Active, "Active user not found").await
}

/// GET /api/auth/user/inactive/{id}
pub async fn get_inactive_user(
    State(users): State<Arc<dyn UserStore>>,
    _caller: AuthUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserSummary>, BackendError> {
    let Path(id) = id?;
    find(users.as_ref(), id, UserFilter::Inactive, "Inactive user not found").await
}

/// DELETE /api/auth/user/soft/{id}
///
/// Flags the account as deleted. The record and its data stay in place.
pub async fn soft_delete_user(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(identity): AuthUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Path(id) = id?;
    require_self_or_admin(&identity, id)?;

    if !users.soft_delete_user(id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("Account {} soft deleted by {}", id, identity.user_id);
    Ok(Json(MessageResponse::new("User soft deleted (marked as deleted)")))
}

/// DELETE /api/auth/user/hard/{id}
///
/// Removes the account and its profile details. A hosted profile picture is
/// destroyed on a best-effort basis.
pub async fn hard_delete_user(
    State(users): State<Arc<dyn UserStore>>,
    State(images): State<Arc<dyn ImageHost>>,
    AuthUser(identity): AuthUser,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Path(id) = id?;

    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    if !users.hard_delete_user(id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    if let Some(public_id) = user.profile_picture.as_deref().and_then(|url| images.public_id_for(url)) {
        match images.destroy(&public_id).await {
            Ok(()) | Err(ImageHostError::NotConfigured) => {}
            Err(e) => tracing::warn!("Could not destroy image {} of deleted account {}: {}", public_id, id, e),
        }
    }

    tracing::info!("Account {} permanently deleted by admin {}", id, identity.user_id);
    Ok(Json(MessageResponse::new("User permanently deleted")))
}
