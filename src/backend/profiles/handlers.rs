/**
 * Profile Handlers
 *
 * `/api/users` endpoints: the caller's profile, the profile picture and the
 * role-specific details. Every handler acts on the caller's own account.
 *
 * Employer details are only available to employer accounts, job-seeker
 * details only to job-seeker accounts.
 */

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};
use bytes::{Bytes, BytesMut};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::identity::require_role;
use crate::backend::auth::users::{User, UserId};
use crate::backend::error::BackendError;
use crate::backend::media::{HostedImage, ImageHost};
use crate::backend::middleware::AuthUser;
use crate::backend::profiles::models::{
    EmployerDetailsRequest, EmployerProfile, JobseekerDetailsRequest, JobseekerProfile,
    ProfilePictureResponse, ProfileWithDetails, UserProfile,
};
use crate::backend::store::{ProfileStore, UserStore};
use crate::shared::Role;

/// Multipart field carrying the picture
pub const PICTURE_FIELD: &str = "profile_picture";

/// Largest accepted picture, in bytes
pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for the upload route, leaving room for multipart framing
pub const UPLOAD_BODY_LIMIT: usize = MAX_PICTURE_BYTES + 64 * 1024;

async fn current_user(users: &dyn UserStore, id: UserId) -> Result<User, BackendError> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))
}

/// GET /api/users/profile
pub async fn get_profile(
    State(users): State<Arc<dyn UserStore>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let user = current_user(users.as_ref(), identity.user_id).await?;
    Ok(Json(UserProfile::from(&user)))
}

/// An image read from the upload form
struct UploadedPicture {
    bytes: Bytes,
    filename: String,
    content_type: String,
}

/// Characters allowed in a media subtype (RFC 7230 `tchar`)
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// Reduce a part's content type to a well-formed `image/<subtype>`.
///
/// Parameters are dropped and the result is lowercased. Anything that is not
/// an image type with a non-empty subtype gives `None`.
fn image_content_type(raw: &str) -> Option<String> {
    let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    let subtype = essence.strip_prefix("image/")?;
    if subtype.is_empty() || !subtype.chars().all(is_token_char) {
        return None;
    }
    Some(essence)
}

/// Find the picture field and read it, enforcing type and size limits
async fn read_picture(mut multipart: Multipart) -> Result<UploadedPicture, BackendError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }

        let content_type = image_content_type(field.content_type().unwrap_or_default())
            .ok_or_else(|| BackendError::validation(PICTURE_FIELD, "Only image files are allowed"))?;
        let filename = field.file_name().unwrap_or(PICTURE_FIELD).to_string();

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            if buffer.len() + chunk.len() > MAX_PICTURE_BYTES {
                return Err(BackendError::validation(
                    PICTURE_FIELD,
                    "Profile picture must not exceed 5 MiB",
                ));
            }
            buffer.extend_from_slice(&chunk);
        }

        if buffer.is_empty() {
            return Err(BackendError::validation(PICTURE_FIELD, "Uploaded file is empty"));
        }

        return Ok(UploadedPicture {
            bytes: buffer.freeze(),
            filename,
            content_type,
        });
    }

    Err(BackendError::validation(PICTURE_FIELD, "No file uploaded"))
}

/// Destroy a previously hosted picture; failures are logged only
async fn discard_old_picture(images: &dyn ImageHost, url: &str) {
    let Some(public_id) = images.public_id_for(url) else {
        tracing::warn!("Cannot derive an image id from {}", url);
        return;
    };
    if let Err(e) = images.destroy(&public_id).await {
        tracing::warn!("Failed to destroy replaced image {}: {}", public_id, e);
    }
}

/// Point the account at a freshly hosted image. If the account vanished in
/// the meantime the image is destroyed again and the caller gets 404.
async fn attach_picture(
    profiles: &dyn ProfileStore,
    images: &dyn ImageHost,
    user_id: UserId,
    hosted: &HostedImage,
) -> Result<(), BackendError> {
    if profiles.set_profile_picture(user_id, Some(&hosted.url)).await? {
        return Ok(());
    }

    if let Err(e) = images.destroy(&hosted.public_id).await {
        tracing::warn!("Failed to destroy orphaned image {}: {}", hosted.public_id, e);
    }
    Err(BackendError::not_found("User not found"))
}

/// PUT /api/users/profile-picture
///
/// Uploads the new picture first and only then destroys the old one, so a
/// failed upload leaves the current picture untouched.
pub async fn upload_profile_picture(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    State(images): State<Arc<dyn ImageHost>>,
    AuthUser(identity): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProfilePictureResponse>, BackendError> {
    let user = current_user(users.as_ref(), identity.user_id).await?;
    let picture = read_picture(multipart?).await?;

    let hosted = images
        .upload(picture.bytes, &picture.filename, &picture.content_type)
        .await?;

    attach_picture(profiles.as_ref(), images.as_ref(), user.id, &hosted).await?;

    if let Some(previous) = user.profile_picture.as_deref().filter(|url| *url != hosted.url) {
        discard_old_picture(images.as_ref(), previous).await;
    }

    tracing::info!("Profile picture updated for account {}", user.id);
    Ok(Json(ProfilePictureResponse {
        message: "Profile picture uploaded successfully".to_string(),
        profile_picture: hosted.url,
    }))
}

/// DELETE /api/users/profile-picture
pub async fn delete_profile_picture(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    State(images): State<Arc<dyn ImageHost>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = current_user(users.as_ref(), identity.user_id).await?;

    if let Some(url) = user.profile_picture.as_deref() {
        match images.public_id_for(url) {
            Some(public_id) => images.destroy(&public_id).await?,
            None => tracing::warn!("Cannot derive an image id from {}", url),
        }
    }

    profiles.set_profile_picture(user.id, None).await?;
    Ok(Json(MessageResponse::new("Profile picture deleted successfully")))
}

/// POST /api/users/employer/details
pub async fn create_employer_details(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<EmployerDetailsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    require_role(&identity, Role::Employer)?;
    let user = current_user(users.as_ref(), identity.user_id).await?;
    let Json(request) = payload?;
    let details = request.validate()?;

    profiles.insert_employer_details(user.id, &details).await?;

    tracing::info!("Employer details created for account {}", identity.user_id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Employer profile created successfully")),
    ))
}

/// GET /api/users/employer/details
pub async fn get_employer_details(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<EmployerProfile>, BackendError> {
    require_role(&identity, Role::Employer)?;
    let user = current_user(users.as_ref(), identity.user_id).await?;

    let details = profiles
        .employer_details(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Employer details not found"))?;

    Ok(Json(ProfileWithDetails::new(&user, details)))
}

/// PUT /api/users/employer/details
pub async fn update_employer_details(
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<EmployerDetailsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    require_role(&identity, Role::Employer)?;
    let Json(request) = payload?;
    let details = request.validate()?;

    if !profiles.update_employer_details(identity.user_id, &details).await? {
        return Err(BackendError::not_found("Employer details not found"));
    }

    Ok(Json(MessageResponse::new("Employer details updated successfully")))
}

/// POST /api/users/jobseeker/details
pub async fn create_jobseeker_details(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<JobseekerDetailsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    require_role(&identity, Role::Jobseeker)?;
    let user = current_user(users.as_ref(), identity.user_id).await?;
    let Json(request) = payload?;
    let details = request.validate()?;

    profiles.insert_jobseeker_details(user.id, &details).await?;

    tracing::info!("Job seeker details created for account {}", identity.user_id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Job seeker profile created successfully")),
    ))
}

/// GET /api/users/jobseeker/details
pub async fn get_jobseeker_details(
    State(users): State<Arc<dyn UserStore>>,
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<JobseekerProfile>, BackendError> {
    require_role(&identity, Role::Jobseeker)?;
    let user = current_user(users.as_ref(), identity.user_id).await?;

    let details = profiles
        .jobseeker_details(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("Job seeker details not found"))?;

    Ok(Json(ProfileWithDetails::new(&user, details)))
}

/// PUT /api/users/jobseeker/details
pub async fn update_jobseeker_details(
    State(profiles): State<Arc<dyn ProfileStore>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<JobseekerDetailsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    require_role(&identity, Role::Jobseeker)?;
    let Json(request) = payload?;
    let details = request.validate()?;

    if !profiles.update_jobseeker_details(identity.user_id, &details).await? {
        return Err(BackendError::not_found("Job seeker details not found"));
    }

    Ok(Json(MessageResponse::new("Job seeker details updated successfully")))
}
