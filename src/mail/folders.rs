/**
 * Folder Registry
 *
 * Per-user named folders. Every user is provisioned with `Inbox`, `Sent`,
 * and `Recent Delete` at creation; those three can neither be renamed nor
 * deleted afterwards. Folder names are unique per user.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use crate::error::ApiError;

/// Name of the folder holding received mail
pub const INBOX: &str = "Inbox";
/// Name of the folder holding sent mail
pub const SENT: &str = "Sent";
/// Name of the folder holding trashed mail
pub const TRASH: &str = "Recent Delete";

/// Folders every user gets at creation
pub const DEFAULT_FOLDERS: [&str; 3] = [INBOX, SENT, TRASH];

/// A folder row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Folder {
    /// Unique folder ID
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    /// Folder name, unique per owner
    pub name: String,
}

/// Create a folder for a user
///
/// Fails with `AlreadyExists` when the user already owns a folder with
/// that name (detected via the unique constraint).
pub async fn create_folder(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<Folder, ApiError> {
    let result = sqlx::query("INSERT INTO folders (user_id, name) VALUES (?, ?)")
        .bind(user_id)
        .bind(name)
        .execute(conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => ApiError::already_exists("folder"),
            _ => ApiError::Database(e),
        })?;

    Ok(Folder {
        id: result.last_insert_rowid(),
        user_id,
        name: name.to_string(),
    })
}

/// Provision the three default folders for a newly created user
pub async fn create_default_folders(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO folders (user_id, name) VALUES (?, ?), (?, ?), (?, ?)")
        .bind(user_id)
        .bind(INBOX)
        .bind(user_id)
        .bind(SENT)
        .bind(user_id)
        .bind(TRASH)
        .execute(conn)
        .await?;

    Ok(())
}

/// Get a folder by ID, scoped to its owner
pub async fn get_owned(
    conn: &mut SqliteConnection,
    folder_id: i64,
    user_id: i64,
) -> Result<Option<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ? AND user_id = ?")
        .bind(folder_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Rename a folder owned by the user
///
/// Default folders are protected; the workflow layer depends on resolving
/// them by name.
pub async fn rename_folder(
    conn: &mut SqliteConnection,
    folder_id: i64,
    user_id: i64,
    new_name: &str,
) -> Result<(), ApiError> {
    let folder = get_owned(conn, folder_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder"))?;

    if DEFAULT_FOLDERS.contains(&folder.name.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "the {} folder cannot be renamed",
            folder.name
        )));
    }

    sqlx::query("UPDATE folders SET name = ? WHERE id = ? AND user_id = ?")
        .bind(new_name)
        .bind(folder_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => ApiError::already_exists("folder"),
            _ => ApiError::Database(e),
        })?;

    Ok(())
}

/// Delete a folder owned by the user, removing its memberships first
///
/// Callers run this inside a transaction so the folder and its
/// memberships disappear together.
pub async fn delete_folder(
    conn: &mut SqliteConnection,
    folder_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let folder = get_owned(conn, folder_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder"))?;

    if DEFAULT_FOLDERS.contains(&folder.name.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "the {} folder cannot be deleted",
            folder.name
        )));
    }

    sqlx::query("DELETE FROM email_folders WHERE folder_id = ?")
        .bind(folder_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM folders WHERE id = ? AND user_id = ?")
        .bind(folder_id)
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Resolve a folder name to its ID for a user
///
/// Used by the workflow layer to look up `Inbox`, `Sent`, and
/// `Recent Delete`; for those three a miss means broken provisioning.
pub async fn resolve_id(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> Result<i64, ApiError> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM folders WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .fetch_optional(conn)
            .await?;

    row.map(|(id,)| id)
        .ok_or_else(|| ApiError::not_found("folder"))
}

/// List a user's folders, default folders first
pub async fn list_folders(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE user_id = ? ORDER BY id ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await
}
