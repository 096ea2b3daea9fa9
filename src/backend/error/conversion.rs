/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus `From` impls that fold the errors
 * of lower layers (input parsing, storage, image host) into the taxonomy.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;
use crate::backend::media::ImageHostError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => Self::Validation { field, message },
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation("id", rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::validation("profile_picture", rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        Self::validation("profile_picture", err.body_text())
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                Self::conflict(format!("A user with this {} already exists", field))
            }
            StoreError::AlreadyExists { what } => Self::conflict(format!("{} already exist", what)),
            StoreError::UserNotFound { .. } => Self::not_found("User not found"),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<ImageHostError> for BackendError {
    fn from(err: ImageHostError) -> Self {
        match err {
            ImageHostError::NotConfigured => {
                Self::unavailable("Profile picture uploads are not configured")
            }
            other => Self::internal(other.to_string()),
        }
    }
}
