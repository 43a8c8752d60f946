//! Shared test fixtures
//!
//! Provides an in-memory SQLite database with migrations applied, plus
//! helpers for creating users and inspecting membership rows.

#![allow(dead_code)]

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use postbox::auth::users::{self, Role, User};
use postbox::server::state::AppState;

/// Password used for every fixture user
pub const TEST_PASSWORD: &str = "password123";

/// Test database fixture backed by in-memory SQLite
///
/// The pool is pinned to one connection so every query sees the same
/// in-memory database for the lifetime of the fixture.
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a fresh in-memory database with migrations applied
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("invalid sqlite options")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("failed to create test database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        Self { pool }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build an application state over this database
    pub fn app_state(&self) -> AppState {
        AppState {
            db_pool: self.pool.clone(),
            mail_domain: "postbox.local".to_string(),
        }
    }
}

/// Create a regular user with the fixture password
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> User {
    create_user_with_role(pool, username, Role::User).await
}

/// Create an admin user with the fixture password
pub async fn create_admin_user(pool: &SqlitePool, username: &str) -> User {
    create_user_with_role(pool, username, Role::Admin).await
}

async fn create_user_with_role(pool: &SqlitePool, username: &str, role: Role) -> User {
    let password_hash =
        bcrypt::hash(TEST_PASSWORD, bcrypt::DEFAULT_COST).expect("failed to hash password");
    let email = format!("{username}@postbox.local");

    users::create_user(pool, "Test", "User", username, &email, &password_hash, role)
        .await
        .expect("failed to create test user")
}

/// Resolve a folder ID by owner and name
pub async fn folder_id(pool: &SqlitePool, user_id: i64, name: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("SELECT id FROM folders WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
            .expect("folder not found");
    id
}

/// Count membership rows for an (email, folder) pair
pub async fn membership_count(pool: &SqlitePool, email_id: i64, folder_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM email_folders WHERE email_id = ? AND folder_id = ?",
    )
    .bind(email_id)
    .bind(folder_id)
    .fetch_one(pool)
    .await
    .expect("failed to count memberships");
    count
}

/// Count all email rows
pub async fn email_count(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM emails")
        .fetch_one(pool)
        .await
        .expect("failed to count emails");
    count
}

/// Count all membership rows
pub async fn total_membership_count(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM email_folders")
        .fetch_one(pool)
        .await
        .expect("failed to count memberships");
    count
}
