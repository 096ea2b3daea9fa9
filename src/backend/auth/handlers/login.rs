/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Security
 *
 * - An unknown identifier, a deactivated account and a wrong password all
 *   return the same 401 body
 * - The response carries only the token
 * - Passwords are never logged
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Login handler
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {"email": "a@x.com", "password": "pw"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."}
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, BackendError> {
    let Json(request) = payload?;
    let (identifier, password) = request.validate()?;

    let token = auth.login(&identifier, password).await?;
    Ok(Json(LoginResponse { token }))
}
