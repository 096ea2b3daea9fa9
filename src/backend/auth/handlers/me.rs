/**
 * Get Current User Handler
 *
 * GET /api/auth/me. Returns the summary of the account the bearer token
 * belongs to, or 404 if that account has been hard-deleted since login.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::auth::users::UserSummary;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::UserStore;

pub async fn get_me(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserSummary>, BackendError> {
    let user = users.find_by_id(identity.user_id).await?.ok_or_else(|| {
        tracing::warn!("Account {} from token no longer exists", identity.user_id);
        BackendError::not_found("User not found")
    })?;

    Ok(Json(UserSummary::from(&user)))
}
