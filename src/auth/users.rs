/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. Users are never
 * hard-deleted; deletion sets `deleted_at` and all read operations filter
 * on it. A user's address is unique among active users only.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::ApiError;
use crate::mail::folders;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// First name
    pub first_name: String,
    /// Second name
    pub second_name: String,
    /// Username (the local part of the mail address)
    pub username: String,
    /// Mail address, derived as `username@<mail domain>`
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role (`user` or `admin`)
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Soft-delete timestamp (null = active)
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Get an active user by email
pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE email = ? AND deleted_at IS NULL",
    )
    .bind(email)
    .fetch_optional(conn)
    .await
}

/// Get an active user by ID
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? AND deleted_at IS NULL")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// List all active users, newest first
pub async fn list_active(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC",
    )
    .fetch_all(conn)
    .await
}

/// Create a new user together with the three default folders
///
/// The user row and the `Inbox` / `Sent` / `Recent Delete` folders are
/// created in one transaction. Fails with `AlreadyExists` when an active
/// user with the same email exists; a partial unique index on active
/// emails backs the pre-check.
///
/// # Returns
/// The created user
pub async fn create_user(
    pool: &SqlitePool,
    first_name: &str,
    second_name: &str,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, ApiError> {
    let mut tx = pool.begin().await?;

    if find_by_email(&mut tx, email).await?.is_some() {
        return Err(ApiError::already_exists("user"));
    }

    let now = Utc::now();
    let result = sqlx::query(
        r#"
        INSERT INTO users (first_name, second_name, username, email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(first_name)
    .bind(second_name)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => ApiError::already_exists("user"),
        _ => ApiError::Database(e),
    })?;

    let user_id = result.last_insert_rowid();

    folders::create_default_folders(&mut tx, user_id).await?;

    tx.commit().await?;

    tracing::info!("created user {} ({})", username, email);

    Ok(User {
        id: user_id,
        first_name: first_name.to_string(),
        second_name: second_name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role,
        created_at: now,
        deleted_at: None,
    })
}

/// Update an active user's details
pub async fn update_user(
    conn: &mut SqliteConnection,
    id: i64,
    first_name: &str,
    second_name: &str,
    username: &str,
    email: &str,
    role: Role,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET first_name = ?, second_name = ?, username = ?, email = ?, role = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(first_name)
    .bind(second_name)
    .bind(username)
    .bind(email)
    .bind(role)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Update an active user's password hash
pub async fn update_password(
    conn: &mut SqliteConnection,
    id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ? AND deleted_at IS NULL")
        .bind(password_hash)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Soft-delete a user
///
/// Sets the user's delete timestamp and flags every email the user sent
/// or received as `is_user_deleted`. The email rows themselves are kept.
pub async fn soft_delete_user(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE users SET deleted_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "UPDATE emails SET is_user_deleted = 1 WHERE sender_id = ? OR receiver_id = ?",
    )
    .bind(id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("soft-deleted user {}", id);

    Ok(())
}
