/**
 * Authentication Middleware
 *
 * Protects routes with an `Authorization: Bearer <token>` header. The
 * verified identity is attached to the request extensions, where handlers
 * pick it up through the `AuthUser` extractor.
 *
 * With `AUTH_ROLE_SOURCE=store` the role in the token is replaced by the
 * role currently stored for the account, and tokens of deleted or
 * deactivated accounts stop working immediately.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::identity::{require_role, Identity};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{Role, RoleSource};

/// Pull the bearer token out of the headers.
///
/// A missing header and a header without the literal `Bearer ` prefix are
/// both treated as "no token provided".
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::MissingToken
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::MissingToken
    })
}

/// Authentication middleware
///
/// 1. Extracts the bearer token
/// 2. Verifies signature and expiry
/// 3. Optionally refreshes the role from the store
/// 4. Attaches the [`Identity`] to the request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;
    let mut identity = state.tokens.verify(token)?;

    if state.role_source == RoleSource::Store {
        let user = state
            .users
            .find_by_id(identity.user_id)
            .await?
            .filter(|user| user.is_active())
            .ok_or_else(|| {
                tracing::warn!("Token for missing or deactivated account {}", identity.user_id);
                BackendError::InvalidToken
            })?;

        if user.role != identity.role {
            tracing::debug!(
                "Role of account {} changed from {} to {} since login",
                user.id,
                identity.role,
                user.role
            );
        }
        identity.role = user.role;
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Admin gate, layered inside [`auth_middleware`]
pub async fn require_admin(request: Request, next: Next) -> Result<Response, BackendError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .copied()
        .ok_or(BackendError::MissingToken)?;

    require_role(&identity, Role::Admin)?;
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Only valid on routes behind [`auth_middleware`]; elsewhere it rejects
/// with 401.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().copied().ok_or_else(|| {
            tracing::warn!("Identity not found in request extensions");
            BackendError::MissingToken
        })?;

        Ok(AuthUser(identity))
    }
}
