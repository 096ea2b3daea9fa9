/**
 * Profile Models
 *
 * Employer and job-seeker details, the request bodies that create or
 * replace them, and the response views joined with the owning account.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{User, UserId};
use crate::shared::error::{optional_field, require_field};
use crate::shared::{Role, SharedError};

/// Upper bound for `experience_years`
const MAX_EXPERIENCE_YEARS: i32 = 80;

/// Company details attached to an employer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerDetails {
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_website: Option<String>,
    pub contact_number: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

/// Body of `POST`/`PUT /api/users/employer/details`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployerDetailsRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EmployerDetailsRequest {
    pub fn validate(self) -> Result<EmployerDetails, SharedError> {
        Ok(EmployerDetails {
            company_name: require_field("company_name", self.company_name.as_deref())?,
            company_address: optional_field(self.company_address),
            company_website: optional_field(self.company_website),
            contact_number: optional_field(self.contact_number),
            industry: optional_field(self.industry),
            description: optional_field(self.description),
        })
    }
}

/// Candidate details attached to a job-seeker account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobseekerDetails {
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub resume_url: Option<String>,
}

/// Body of `POST`/`PUT /api/users/jobseeker/details`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobseekerDetailsRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

impl JobseekerDetailsRequest {
    pub fn validate(self) -> Result<JobseekerDetails, SharedError> {
        let full_name = require_field("full_name", self.full_name.as_deref())?;

        if let Some(years) = self.experience_years {
            if !(0..=MAX_EXPERIENCE_YEARS).contains(&years) {
                return Err(SharedError::validation(
                    "experience_years",
                    format!("experience_years must be between 0 and {}", MAX_EXPERIENCE_YEARS),
                ));
            }
        }

        // Blank entries are dropped and duplicates collapsed, keeping first-seen order
        let mut skills: Vec<String> = Vec::with_capacity(self.skills.len());
        for skill in self.skills {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && !skills.contains(&skill) {
                skills.push(skill);
            }
        }

        Ok(JobseekerDetails {
            full_name,
            phone: optional_field(self.phone),
            location: optional_field(self.location),
            headline: optional_field(self.headline),
            skills,
            experience_years: self.experience_years,
            resume_url: optional_field(self.resume_url),
        })
    }
}

/// `GET /api/users/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
            created_at: user.created_at,
        }
    }
}

/// Details joined with the owning account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWithDetails<D> {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub details: D,
}

impl<D> ProfileWithDetails<D> {
    pub fn new(user: &User, details: D) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
            details,
        }
    }
}

pub type EmployerProfile = ProfileWithDetails<EmployerDetails>;
pub type JobseekerProfile = ProfileWithDetails<JobseekerDetails>;

/// `PUT /api/users/profile-picture`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePictureResponse {
    pub message: String,
    pub profile_picture: String,
}
