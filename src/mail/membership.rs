/**
 * Folder-Membership Index
 *
 * The many-to-many association between emails and folders. One email can
 * appear in several folders at once (a trashed email keeps its Inbox
 * membership, for example). The composite primary key on
 * (email_id, folder_id) makes `add_membership` idempotent, so trash,
 * recover, and move never produce duplicate rows even when racing.
 */

use sqlx::SqliteConnection;

use crate::mail::email::Email;

/// Which side of an email the listing user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Sender,
    Receiver,
}

/// Associate an email with a folder
///
/// Idempotent; an existing identical membership is left untouched.
pub async fn add_membership(
    conn: &mut SqliteConnection,
    email_id: i64,
    folder_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO email_folders (email_id, folder_id) VALUES (?, ?) ON CONFLICT DO NOTHING",
    )
    .bind(email_id)
    .bind(folder_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// List the non-trashed emails in a folder for one participant role,
/// newest first
pub async fn list_by_folder(
    conn: &mut SqliteConnection,
    folder_id: i64,
    user_id: i64,
    participant: Participant,
) -> Result<Vec<Email>, sqlx::Error> {
    let query = match participant {
        Participant::Receiver => {
            r#"
            SELECT e.* FROM emails e
            JOIN email_folders ef ON e.id = ef.email_id
            WHERE ef.folder_id = ? AND e.receiver_id = ? AND e.deleted_at IS NULL
            ORDER BY e.created_at DESC
            "#
        }
        Participant::Sender => {
            r#"
            SELECT e.* FROM emails e
            JOIN email_folders ef ON e.id = ef.email_id
            WHERE ef.folder_id = ? AND e.sender_id = ? AND e.deleted_at IS NULL
            ORDER BY e.created_at DESC
            "#
        }
    };

    sqlx::query_as::<_, Email>(query)
        .bind(folder_id)
        .bind(user_id)
        .fetch_all(conn)
        .await
}

/// List the trashed emails in a folder where the user is sender or
/// receiver, newest first
pub async fn list_trashed(
    conn: &mut SqliteConnection,
    folder_id: i64,
    user_id: i64,
) -> Result<Vec<Email>, sqlx::Error> {
    sqlx::query_as::<_, Email>(
        r#"
        SELECT e.* FROM emails e
        JOIN email_folders ef ON e.id = ef.email_id
        WHERE ef.folder_id = ?
          AND (e.sender_id = ? OR e.receiver_id = ?)
          AND e.deleted_at IS NOT NULL
        ORDER BY e.created_at DESC
        "#,
    )
    .bind(folder_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(conn)
    .await
}
