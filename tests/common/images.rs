//! Recording image host
//!
//! Stands in for Cloudinary in router tests: uploads get sequential ids and
//! every call is recorded for assertions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use jobboard::backend::media::{public_id_from_url, HostedImage, ImageHost, ImageHostError};

pub const TEST_FOLDER: &str = "profile_pictures";

#[derive(Debug, Default)]
pub struct RecordingImageHost {
    counter: AtomicUsize,
    uploads: Mutex<Vec<(String, String, usize)>>,
    destroyed: Mutex<Vec<String>>,
}

impl RecordingImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(filename, content_type, size)` per upload
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.uploads.lock().expect("lock").clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<HostedImage, ImageHostError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.uploads
            .lock()
            .expect("lock")
            .push((filename.to_string(), content_type.to_string(), bytes.len()));

        let public_id = format!("{}/img{}", TEST_FOLDER, n);
        Ok(HostedImage {
            url: format!("https://img.test/image/upload/v1/{}.png", public_id),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ImageHostError> {
        self.destroyed.lock().expect("lock").push(public_id.to_string());
        Ok(())
    }

    fn public_id_for(&self, url: &str) -> Option<String> {
        public_id_from_url(url, TEST_FOLDER)
    }
}

/// Build a single-file multipart body; returns `(content type header, body)`
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "jobboard-test-boundary";

    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"{n}\"\r\nContent-Type: {ct}\r\n\r\n",
        b = boundary,
        f = field,
        n = filename,
        ct = content_type,
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
