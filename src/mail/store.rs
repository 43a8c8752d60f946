/**
 * Message Store
 *
 * Database operations for canonical email rows and drafts. An email's
 * content is immutable after insert; only the read/important flags and
 * the trash timestamp change, each scoped to the caller's relationship
 * to the row (receiver for the read flag, sender or receiver for the
 * rest).
 */

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::mail::email::{Draft, Email};

/// Insert one email row, returning its ID
pub async fn insert_email(
    conn: &mut SqliteConnection,
    sender_id: i64,
    receiver_id: i64,
    cc: Option<&str>,
    subject: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO emails (sender_id, receiver_id, cc, subject, body, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(cc)
    .bind(subject)
    .bind(body)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load an email by ID
pub async fn get_email(
    conn: &mut SqliteConnection,
    email_id: i64,
) -> Result<Option<Email>, sqlx::Error> {
    sqlx::query_as::<_, Email>("SELECT * FROM emails WHERE id = ?")
        .bind(email_id)
        .fetch_optional(conn)
        .await
}

/// Set or clear the read flag, scoped to the receiver
///
/// Silently no-ops when the ID does not match a row the caller received.
pub async fn set_read(
    conn: &mut SqliteConnection,
    email_id: i64,
    receiver_id: i64,
    read: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE emails SET is_read = ? WHERE id = ? AND receiver_id = ?")
        .bind(read)
        .bind(email_id)
        .bind(receiver_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Set the important flag, scoped to sender or receiver
pub async fn set_important(
    conn: &mut SqliteConnection,
    email_id: i64,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE emails SET is_important = 1 WHERE id = ? AND (sender_id = ? OR receiver_id = ?)",
    )
    .bind(email_id)
    .bind(user_id)
    .bind(user_id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Set or clear the trash timestamp, scoped to sender or receiver
///
/// Returns the number of rows touched so callers can distinguish an
/// email that is absent or not owned.
pub async fn set_trashed(
    conn: &mut SqliteConnection,
    email_id: i64,
    user_id: i64,
    trashed: bool,
) -> Result<u64, sqlx::Error> {
    let deleted_at = if trashed { Some(Utc::now()) } else { None };

    let result = sqlx::query(
        "UPDATE emails SET deleted_at = ? WHERE id = ? AND (sender_id = ? OR receiver_id = ?)",
    )
    .bind(deleted_at)
    .bind(email_id)
    .bind(user_id)
    .bind(user_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Insert a draft row, returning its ID
pub async fn insert_draft(
    conn: &mut SqliteConnection,
    sender_id: i64,
    receiver_ids: &[i64],
    cc: Option<&str>,
    subject: &str,
    body: &str,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO drafts (sender_id, recipients, cc, subject, body, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sender_id)
    .bind(Draft::join_recipients(receiver_ids))
    .bind(cc)
    .bind(subject)
    .bind(body)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List a user's drafts, most recently saved first
pub async fn list_drafts(
    conn: &mut SqliteConnection,
    sender_id: i64,
) -> Result<Vec<Draft>, sqlx::Error> {
    sqlx::query_as::<_, Draft>(
        "SELECT * FROM drafts WHERE sender_id = ? ORDER BY updated_at DESC",
    )
    .bind(sender_id)
    .fetch_all(conn)
    .await
}

/// Delete a draft, scoped to its author
///
/// Returns the number of rows removed; 0 means the draft was absent or
/// owned by someone else.
pub async fn delete_draft(
    conn: &mut SqliteConnection,
    draft_id: i64,
    sender_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM drafts WHERE id = ? AND sender_id = ?")
        .bind(draft_id)
        .bind(sender_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
