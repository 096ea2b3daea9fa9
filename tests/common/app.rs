//! In-memory test application
//!
//! Builds the real router on a `MemoryStore` with a low bcrypt cost and
//! sends requests through it without opening a socket.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use super::auth_helpers::auth_header;
use jobboard::backend::media::{DisabledImageHost, ImageHost};
use jobboard::backend::routes::create_router;
use jobboard::backend::server::AppState;
use jobboard::backend::store::MemoryStore;
use jobboard::shared::{AppConfig, RoleSource};

/// Signing secret used by every test app
pub const TEST_SECRET: &str = "integration-test-secret";

/// Router plus direct access to its store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// App without an image host
    pub fn new() -> Self {
        Self::build(RoleSource::Token, Arc::new(DisabledImageHost))
    }

    /// App with the given image host
    pub fn with_images(images: Arc<dyn ImageHost>) -> Self {
        Self::build(RoleSource::Token, images)
    }

    /// App whose middleware re-reads roles from the store
    pub fn with_role_source(role_source: RoleSource) -> Self {
        Self::build(role_source, Arc::new(DisabledImageHost))
    }

    fn build(role_source: RoleSource, images: Arc<dyn ImageHost>) -> Self {
        let config = AppConfig::builder()
            .jwt_secret(TEST_SECRET)
            .bcrypt_cost(4)
            .role_source(role_source)
            .build()
            .expect("test config is valid");

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(&config, store.clone(), images).expect("test state");

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Send a request and return the status and the JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        json: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, auth_header(token));
        }

        let request = match json {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, json: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(json)).await
    }

    pub async fn put(&self, uri: &str, token: &str, json: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(json)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}
