//! Database test fixtures and utilities
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a disposable
//! database; otherwise the fixture is `None` and the test returns early.

use sqlx::PgPool;

use jobboard::backend::store::PgStore;

/// Connect to the test database, if one is configured
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    Some(pool)
}

/// Remove all rows while keeping the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE employer_details, jobseeker_details, users RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect, migrate and empty the test database.
    ///
    /// Returns `None` when `TEST_DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let pool = create_test_pool().await?;
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        cleanup_test_data(&pool).await.expect("Failed to clean test data");
        Some(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }
}
