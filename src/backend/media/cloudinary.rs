/**
 * Cloudinary Image Host
 *
 * Signed uploads and deletions through the Cloudinary REST API.
 *
 * # Signing
 *
 * Every request carries `timestamp`, `api_key` and `signature`. The signature
 * is the hex SHA-256 of the signed parameters sorted by name and joined as
 * `k=v&k=v`, followed directly by the API secret. `file`, `api_key` and
 * `signature_algorithm` are not part of the signed string.
 */

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::backend::media::{public_id_from_url, HostedImage, ImageHost, ImageHostError};
use crate::shared::CloudinaryConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Sign a parameter set with the API secret
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cloudinary-backed [`ImageHost`]
#[derive(Debug, Clone)]
pub struct CloudinaryHost {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageHostError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.config.api_base, self.config.cloud_name, action
        )
    }

    /// Add `api_key`, `signature` and the signed parameters to a form
    fn signed_form(&self, params: Vec<(&'static str, String)>) -> Form {
        let signature = sign(&params, &self.config.api_secret);

        let mut form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }
        form
    }

    async fn send(&self, action: &str, form: Form) -> Result<reqwest::Response, ImageHostError> {
        let response = self
            .client
            .post(self.endpoint(action))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);

        tracing::warn!("Cloudinary {} failed ({}): {}", action, status, message);
        Err(ImageHostError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<HostedImage, ImageHostError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let params = vec![("folder", self.config.folder.clone()), ("timestamp", timestamp)];

        let file = Part::stream(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = self.signed_form(params).part("file", file);

        let response = self.send("upload", form).await?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;

        tracing::info!("Uploaded image {}", body.public_id);
        Ok(HostedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let params = vec![("public_id", public_id.to_string()), ("timestamp", timestamp)];

        let response = self.send("destroy", self.signed_form(params)).await?;
        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| ImageHostError::InvalidResponse(e.to_string()))?;

        match body.result.as_str() {
            "ok" => {
                tracing::info!("Destroyed image {}", public_id);
                Ok(())
            }
            "not found" => {
                tracing::debug!("Image {} was already gone", public_id);
                Ok(())
            }
            other => Err(ImageHostError::InvalidResponse(format!(
                "destroy returned '{}'",
                other
            ))),
        }
    }

    fn public_id_for(&self, url: &str) -> Option<String> {
        public_id_from_url(url, &self.config.folder)
    }
}
