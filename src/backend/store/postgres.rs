/**
 * PostgreSQL Store
 *
 * `UserStore` and `ProfileStore` on a `sqlx::PgPool`. The schema lives in
 * `migrations/` and is applied at startup by `server::config::load_database`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::auth::users::{NewUser, User, UserFilter, UserId, UserSummary};
use crate::backend::profiles::models::{EmployerDetails, JobseekerDetails};
use crate::backend::store::{ProfileStore, StoreError, UserStore};
use crate::shared::Role;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, is_deleted, profile_picture, created_at";

/// Raw `users` row
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_deleted: bool,
    profile_picture: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("user {} has role '{}'", row.id, row.role)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_deleted: row.is_deleted,
            profile_picture: row.profile_picture,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmployerRow {
    company_name: String,
    company_address: Option<String>,
    company_website: Option<String>,
    contact_number: Option<String>,
    industry: Option<String>,
    description: Option<String>,
}

impl From<EmployerRow> for EmployerDetails {
    fn from(row: EmployerRow) -> Self {
        Self {
            company_name: row.company_name,
            company_address: row.company_address,
            company_website: row.company_website,
            contact_number: row.contact_number,
            industry: row.industry,
            description: row.description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JobseekerRow {
    full_name: String,
    phone: Option<String>,
    location: Option<String>,
    headline: Option<String>,
    skills: Vec<String>,
    experience_years: Option<i32>,
    resume_url: Option<String>,
}

impl From<JobseekerRow> for JobseekerDetails {
    fn from(row: JobseekerRow) -> Self {
        Self {
            full_name: row.full_name,
            phone: row.phone,
            location: row.location,
            headline: row.headline,
            skills: row.skills,
            experience_years: row.experience_years,
            resume_url: row.resume_url,
        }
    }
}

/// Map unique violations on `users` to [`StoreError::Duplicate`]
fn map_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("users_name_key") => "name",
                _ => "email",
            };
            return StoreError::Duplicate { field };
        }
    }
    StoreError::Database(err)
}

/// Map a primary-key violation on a details table to [`StoreError::AlreadyExists`]
/// and a missing owner to [`StoreError::UserNotFound`]
fn map_details_insert_error(err: sqlx::Error, user_id: UserId, what: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::AlreadyExists { what };
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::UserNotFound { id: user_id };
        }
    }
    StoreError::Database(err)
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }


    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_one("email", email).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        self.find_one("name", name).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_insert_error)?;

        User::try_from(row)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserSummary>, StoreError> {
        let condition = match filter {
            UserFilter::All => "",
            UserFilter::Active => " WHERE is_deleted = FALSE",
            UserFilter::Inactive => " WHERE is_deleted = TRUE",
        };
        let sql = format!("SELECT {} FROM users{} ORDER BY id", USER_COLUMNS, condition);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| User::try_from(row).map(|user| UserSummary::from(&user)))
            .collect()
    }

    async fn soft_delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn hard_delete_user(&self, id: UserId) -> Result<bool, StoreError> {
        // Details rows go with the account through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn set_profile_picture(
        &self,
        user_id: UserId,
        url: Option<&str>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET profile_picture = $1 WHERE id = $2")
            .bind(url)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn employer_details(
        &self,
        user_id: UserId,
    ) -> Result<Option<EmployerDetails>, StoreError> {
        let row = sqlx::query_as::<_, EmployerRow>(
            r#"
            SELECT company_name, company_address, company_website, contact_number, industry, description
            FROM employer_details
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployerDetails::from))
    }

    async fn insert_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO employer_details
                (user_id, company_name, company_address, company_website, contact_number, industry, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user_id)
        .bind(&details.company_name)
        .bind(&details.company_address)
        .bind(&details.company_website)
        .bind(&details.contact_number)
        .bind(&details.industry)
        .bind(&details.description)
        .execute(&self.pool)
        .await
        .map_err(|e| map_details_insert_error(e, user_id, "Employer details"))?;

        Ok(())
    }

    async fn update_employer_details(
        &self,
        user_id: UserId,
        details: &EmployerDetails,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employer_details
            SET company_name = $1, company_address = $2, company_website = $3,
                contact_number = $4, industry = $5, description = $6, updated_at = NOW()
            WHERE user_id = $7
            "#,
        )
        .bind(&details.company_name)
        .bind(&details.company_address)
        .bind(&details.company_website)
        .bind(&details.contact_number)
        .bind(&details.industry)
        .bind(&details.description)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn jobseeker_details(
        &self,
        user_id: UserId,
    ) -> Result<Option<JobseekerDetails>, StoreError> {
        let row = sqlx::query_as::<_, JobseekerRow>(
            r#"
            SELECT full_name, phone, location, headline, skills, experience_years, resume_url
            FROM jobseeker_details
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(JobseekerDetails::from))
    }

    async fn insert_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobseeker_details
                (user_id, full_name, phone, location, headline, skills, experience_years, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user_id)
        .bind(&details.full_name)
        .bind(&details.phone)
        .bind(&details.location)
        .bind(&details.headline)
        .bind(&details.skills)
        .bind(details.experience_years)
        .bind(&details.resume_url)
        .execute(&self.pool)
        .await
        .map_err(|e| map_details_insert_error(e, user_id, "Job seeker details"))?;

        Ok(())
    }

    async fn update_jobseeker_details(
        &self,
        user_id: UserId,
        details: &JobseekerDetails,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE jobseeker_details
            SET full_name = $1, phone = $2, location = $3, headline = $4,
                skills = $5, experience_years = $6, resume_url = $7, updated_at = NOW()
            WHERE user_id = $8
            "#,
        )
        .bind(&details.full_name)
        .bind(&details.phone)
        .bind(&details.location)
        .bind(&details.headline)
        .bind(&details.skills)
        .bind(details.experience_years)
        .bind(&details.resume_url)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
