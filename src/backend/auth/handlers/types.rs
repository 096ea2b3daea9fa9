/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/api/auth` endpoints. Request fields
 * are optional at the serde level so a missing field surfaces as a 400 with
 * a field-specific message rather than a generic JSON rejection.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::require_field;
use crate::shared::{Role, SharedError};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password (hashed before storage, never logged)
    #[serde(default)]
    pub password: Option<String>,
    /// Role name, case-insensitive
    #[serde(default)]
    pub role: Option<String>,
}

/// A registration that passed input validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    /// Lowercased
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    /// Check that every field is present and the role is known.
    ///
    /// Names and emails are trimmed and the email is lowercased. The password
    /// is taken as-is apart from rejecting an all-blank value.
    pub fn validate(self) -> Result<Registration, SharedError> {
        let name = require_field("name", self.name.as_deref())?;
        let email = require_field("email", self.email.as_deref())?.to_lowercase();
        require_field("password", self.password.as_deref())?;
        let role: Role = require_field("role", self.role.as_deref())?.parse()?;

        Ok(Registration {
            name,
            email,
            password: self.password.unwrap_or_default(),
            role,
        })
    }
}

/// Login request
///
/// The identifier may be sent as `identifier`, `email` or `name`.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default, alias = "email", alias = "name")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(identifier, password)`
    pub fn validate(self) -> Result<(String, String), SharedError> {
        let identifier = require_field("identifier", self.identifier.as_deref())?;
        require_field("password", self.password.as_deref())?;
        Ok((identifier, self.password.unwrap_or_default()))
    }
}

/// Login response, exactly `{"token": "..."}`
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

/// Plain acknowledgement body
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            role: Some(role.to_string()),
        }
    }

    #[test]
    fn test_register_normalizes_role_and_email() {
        let registration = request("alice", "A@X.com", "pw", "Employer").validate().unwrap();
        assert_eq!(registration.role, Role::Employer);
        assert_eq!(registration.email, "a@x.com");
        assert_eq!(registration.name, "alice");
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let err = request("alice", "a@x.com", "pw", "superuser").validate().unwrap_err();
        assert!(err.client_message().contains("Invalid role"));
    }

    #[test]
    fn test_register_requires_every_field() {
        let err = request("alice", "a@x.com", "   ", "admin").validate().unwrap_err();
        assert!(matches!(err, SharedError::ValidationError { ref field, .. } if field == "password"));

        let err = RegisterRequest::default().validate().unwrap_err();
        assert!(matches!(err, SharedError::ValidationError { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_login_identifier_aliases() {
        for body in [
            r#"{"identifier": "alice", "password": "pw"}"#,
            r#"{"email": "alice", "password": "pw"}"#,
            r#"{"name": "alice", "password": "pw"}"#,
        ] {
            let request: LoginRequest = serde_json::from_str(body).unwrap();
            let (identifier, password) = request.validate().unwrap();
            assert_eq!(identifier, "alice");
            assert_eq!(password, "pw");
        }
    }

    #[test]
    fn test_login_response_shape() {
        let body = serde_json::to_value(LoginResponse { token: "t".into() }).unwrap();
        assert_eq!(body, serde_json::json!({"token": "t"}));
    }
}
