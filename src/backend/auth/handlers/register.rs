/**
 * Register Handler
 *
 * POST /api/auth/register
 *
 * # Registration Process
 *
 * 1. Validate that name, email, password and role are present
 * 2. Normalize the role (case-insensitive) and the email (lowercase)
 * 3. Reject a taken email or name with 409
 * 4. Hash the password and store the account
 *
 * No token is returned; clients log in afterwards.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing field or unknown role
/// * `409 Conflict` - email or name already registered
/// * `500 Internal Server Error` - storage or hashing failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "alice", "email": "a@x.com", "password": "pw", "role": "Employer"}
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    let Json(request) = payload?;
    let registration = request.validate()?;

    tracing::info!("Registration request for name '{}'", registration.name);
    auth.register(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}
