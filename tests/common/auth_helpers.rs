//! Authentication test helpers
//!
//! Register and log in through the HTTP API, mint tokens directly, and
//! build bearer headers.

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::json;

use jobboard::backend::auth::{TokenService, UserId};
use jobboard::shared::Role;

use super::app::{TestApp, TEST_SECRET};

/// A registered, logged-in account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> (StatusCode, serde_json::Value) {
        self.request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": password,
                "role": role,
            })),
        )
        .await
    }

    pub async fn login(&self, identifier: &str, password: &str) -> (StatusCode, serde_json::Value) {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": identifier, "password": password })),
        )
        .await
    }

    /// Register, log in and resolve the account id through `/api/auth/me`
    pub async fn create_user(&self, name: &str, role: &str) -> TestUser {
        let email = format!("{}@example.com", name);
        let password = format!("{}-password", name);

        let (status, body) = self.register(name, &email, &password, role).await;
        assert_eq!(status, StatusCode::CREATED, "register {}: {}", name, body);

        let (status, body) = self.login(name, &password).await;
        assert_eq!(status, StatusCode::OK, "login {}: {}", name, body);
        let token = body["token"].as_str().expect("token in login body").to_string();

        let (status, me) = self.get("/api/auth/me", &token).await;
        assert_eq!(status, StatusCode::OK, "me {}: {}", name, me);

        TestUser {
            id: me["id"].as_i64().expect("numeric id"),
            name: name.to_string(),
            email,
            password,
            token,
        }
    }
}

/// Mint a token with the test secret as if issued at `issued_at`
pub fn token_issued_at(user_id: UserId, role: Role, issued_at: DateTime<Utc>) -> String {
    TokenService::new(TEST_SECRET)
        .expect("test secret")
        .issue_at(user_id, role, issued_at)
        .expect("token")
}

/// Mint a fresh token with the test secret
pub fn token_for(user_id: UserId, role: Role) -> String {
    token_issued_at(user_id, role, Utc::now())
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
