//! Media Module
//!
//! Profile pictures live on an external image host. Handlers talk to it
//! through the [`ImageHost`] trait:
//!
//! - **`cloudinary`** - signed upload/destroy against the Cloudinary API
//! - **`DisabledImageHost`** - used when no host is configured; every call
//!   fails with [`ImageHostError::NotConfigured`] (503 at the HTTP boundary)

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::shared::config::DEFAULT_IMAGE_FOLDER;

/// Cloudinary client
pub mod cloudinary;

pub use cloudinary::CloudinaryHost;

/// An image stored on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    /// Public HTTPS URL
    pub url: String,
    /// Identifier the host needs to destroy the image
    pub public_id: String,
}

/// Image host errors
#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("image host is not configured")]
    NotConfigured,

    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered with a non-success status
    #[error("image host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected image host response: {0}")]
    InvalidResponse(String),
}

/// External image storage
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<HostedImage, ImageHostError>;

    /// Destroying an image that no longer exists is not an error
    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError>;

    /// Recover the public id of an image from its stored URL
    fn public_id_for(&self, url: &str) -> Option<String>;
}

/// Derive a destroy id from a hosted image URL.
///
/// The id is the last path segment without its extension, prefixed by the
/// upload folder: `.../v123/profile_pictures/abc.jpg` gives
/// `profile_pictures/abc`.
pub fn public_id_from_url(url: &str, folder: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().filter(|s| !s.is_empty())?;
    let stem = match file.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => file,
    };

    if folder.is_empty() {
        Some(stem.to_string())
    } else {
        Some(format!("{}/{}", folder, stem))
    }
}

/// Stand-in used when uploads are not configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(
        &self,
        _bytes: Bytes,
        _filename: &str,
        _content_type: &str,
    ) -> Result<HostedImage, ImageHostError> {
        Err(ImageHostError::NotConfigured)
    }

    async fn destroy(&self, _public_id: &str) -> Result<(), ImageHostError> {
        Err(ImageHostError::NotConfigured)
    }

    fn public_id_for(&self, url: &str) -> Option<String> {
        public_id_from_url(url, DEFAULT_IMAGE_FOLDER)
    }
}
