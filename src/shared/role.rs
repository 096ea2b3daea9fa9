//! Account Roles
//!
//! Every account carries exactly one role from a fixed set. The wire form is
//! always lowercase (`admin`, `employer`, `jobseeker`); parsing from request
//! input is case-insensitive, while token claims are matched exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator (may hard-delete accounts)
    Admin,
    /// Company posting jobs
    Employer,
    /// Candidate looking for jobs
    Jobseeker,
}

impl Role {
    /// All roles, in the order they are listed to clients
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employer, Role::Jobseeker];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employer => "employer",
            Role::Jobseeker => "jobseeker",
        }
    }

    /// Comma-separated list of allowed role names, for error messages
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse used for request input.
///
/// Stored and signed values are always produced by [`Role::as_str`], so this
/// is the only place where normalization happens.
impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employer" => Ok(Role::Employer),
            "jobseeker" => Ok(Role::Jobseeker),
            _ => Err(SharedError::validation(
                "role",
                format!("Invalid role. Allowed roles: {}", Role::allowed_list()),
            )),
        }
    }
}
