/**
 * Mail Workflow Engine
 *
 * The multi-step operations composed from the message store, the folder
 * registry, and the membership index: send (with CC fan-out and draft
 * promotion), reply, reply-all, forward, trash/recover, and the folder
 * listings. Every write operation runs inside one transaction so a
 * failure partway through leaves no partial rows behind.
 *
 * # Recipient model
 *
 * A send to N recipients creates N independent email rows, each placed
 * in the sender's `Sent` folder and that recipient's `Inbox`. CC
 * recipients get their own rows the same way, with the full original CC
 * string echoed on each row.
 *
 * # CC resolution policy
 *
 * Send resolves CC addresses strictly: any address without a matching
 * active user aborts the whole operation with `RecipientNotFound`.
 * Reply-all resolves leniently and skips addresses it cannot resolve.
 * The asymmetry is deliberate: composing to an unknown address is a user
 * error worth surfacing, while a stale CC list on old mail should not
 * block a reply.
 */

use sqlx::{SqliteConnection, SqlitePool};

use crate::auth::users;
use crate::error::ApiError;
use crate::mail::email::{Draft, Email};
use crate::mail::folders::{self, Folder, INBOX, SENT, TRASH};
use crate::mail::membership::{self, Participant};
use crate::mail::store;

/// Marker separating the new body from the quoted original in a forward
pub const FORWARD_MARKER: &str = "--- Forwarded message ---";

/// Subject for a reply to the given original subject
fn reply_subject(original: &str) -> String {
    format!("Re: {original}")
}

/// Subject for a forward of the given original subject
fn forward_subject(original: &str) -> String {
    format!("Fwd: {original}")
}

/// Body for a forward: the new text, the marker, then the original body
fn forward_body(body: &str, original_body: &str) -> String {
    format!("{body}\n\n{FORWARD_MARKER}\n\n{original_body}")
}

/// Split a raw CC string into trimmed, non-empty addresses
fn split_cc(cc: &str) -> impl Iterator<Item = &str> {
    cc.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve every CC address to an active user ID, failing on the first
/// address with no match
async fn resolve_cc_strict(
    conn: &mut SqliteConnection,
    cc: &str,
) -> Result<Vec<i64>, ApiError> {
    let mut ids = Vec::new();
    for address in split_cc(cc) {
        let user = users::find_by_email(conn, address)
            .await?
            .ok_or_else(|| ApiError::RecipientNotFound(address.to_string()))?;
        ids.push(user.id);
    }
    Ok(ids)
}

/// Insert one email row and its Sent/Inbox membership pair
///
/// `sent_folder_id` is the sender's `Sent` folder, resolved once by the
/// caller; the receiver's `Inbox` is resolved here.
async fn deliver_copy(
    conn: &mut SqliteConnection,
    sender_id: i64,
    receiver_id: i64,
    sent_folder_id: i64,
    cc: Option<&str>,
    subject: &str,
    body: &str,
) -> Result<i64, ApiError> {
    let email_id = store::insert_email(conn, sender_id, receiver_id, cc, subject, body).await?;

    let inbox_id = folders::resolve_id(conn, receiver_id, INBOX).await?;
    membership::add_membership(conn, email_id, sent_folder_id).await?;
    membership::add_membership(conn, email_id, inbox_id).await?;

    Ok(email_id)
}

/// Send an email to one or more recipients, with optional CC fan-out
///
/// When `draft_id` is given the draft being sent is consumed in the same
/// transaction; the request's recipients, CC, subject, and body are what
/// get sent. One email row is created per primary recipient and per
/// resolved CC recipient. An unresolvable CC address fails the whole
/// operation and no rows are kept.
pub async fn send_email(
    pool: &SqlitePool,
    sender_id: i64,
    receiver_ids: &[i64],
    cc: Option<&str>,
    subject: &str,
    body: &str,
    draft_id: Option<i64>,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    if let Some(draft_id) = draft_id {
        let removed = store::delete_draft(&mut tx, draft_id, sender_id).await?;
        if removed == 0 {
            return Err(ApiError::not_found("draft"));
        }
    }

    let cc = cc.map(str::trim).filter(|s| !s.is_empty());
    let cc_user_ids = match cc {
        Some(raw) => resolve_cc_strict(&mut tx, raw).await?,
        None => Vec::new(),
    };

    let sent_folder_id = folders::resolve_id(&mut tx, sender_id, SENT).await?;

    for &receiver_id in receiver_ids {
        deliver_copy(&mut tx, sender_id, receiver_id, sent_folder_id, cc, subject, body)
            .await?;
    }

    for &cc_user_id in &cc_user_ids {
        deliver_copy(&mut tx, sender_id, cc_user_id, sent_folder_id, cc, subject, body)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(
        "user {} sent mail to {} recipients ({} cc)",
        sender_id,
        receiver_ids.len(),
        cc_user_ids.len()
    );

    Ok(())
}

/// Save a draft, returning its ID
///
/// Drafts have no folder placement; they only become visible in `Sent`
/// and the recipients' inboxes once sent.
pub async fn save_draft(
    pool: &SqlitePool,
    sender_id: i64,
    receiver_ids: &[i64],
    cc: Option<&str>,
    subject: &str,
    body: &str,
) -> Result<i64, ApiError> {
    let mut conn = pool.acquire().await?;
    let draft_id =
        store::insert_draft(&mut conn, sender_id, receiver_ids, cc, subject, body).await?;
    Ok(draft_id)
}

/// List a user's drafts, most recently saved first
pub async fn list_drafts(pool: &SqlitePool, user_id: i64) -> Result<Vec<Draft>, ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(store::list_drafts(&mut conn, user_id).await?)
}

/// List the user's inbox: received, non-trashed mail, newest first
pub async fn get_inbox(pool: &SqlitePool, user_id: i64) -> Result<Vec<Email>, ApiError> {
    let mut conn = pool.acquire().await?;
    let inbox_id = folders::resolve_id(&mut conn, user_id, INBOX).await?;
    Ok(membership::list_by_folder(&mut conn, inbox_id, user_id, Participant::Receiver).await?)
}

/// List the user's sent mail: sent, non-trashed, newest first
pub async fn get_sent(pool: &SqlitePool, user_id: i64) -> Result<Vec<Email>, ApiError> {
    let mut conn = pool.acquire().await?;
    let sent_id = folders::resolve_id(&mut conn, user_id, SENT).await?;
    Ok(membership::list_by_folder(&mut conn, sent_id, user_id, Participant::Sender).await?)
}

/// List the user's trash: trashed mail they sent or received, newest first
pub async fn get_trash(pool: &SqlitePool, user_id: i64) -> Result<Vec<Email>, ApiError> {
    let mut conn = pool.acquire().await?;
    let trash_id = folders::resolve_id(&mut conn, user_id, TRASH).await?;
    Ok(membership::list_trashed(&mut conn, trash_id, user_id).await?)
}

/// Mark an email read, scoped to the receiver; no-op on a miss
pub async fn mark_read(pool: &SqlitePool, email_id: i64, user_id: i64) -> Result<(), ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(store::set_read(&mut conn, email_id, user_id, true).await?)
}

/// Mark an email unread, scoped to the receiver; no-op on a miss
pub async fn mark_unread(
    pool: &SqlitePool,
    email_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(store::set_read(&mut conn, email_id, user_id, false).await?)
}

/// Flag an email important, scoped to sender or receiver; no-op on a miss
pub async fn flag_important(
    pool: &SqlitePool,
    email_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(store::set_important(&mut conn, email_id, user_id).await?)
}

/// Move an email to trash
///
/// Sets the trash timestamp (scoped to sender or receiver) and adds a
/// membership in the user's `Recent Delete` folder. Fails with
/// `NotFound` when the email is absent or not the caller's.
pub async fn move_to_trash(
    pool: &SqlitePool,
    email_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let trash_id = folders::resolve_id(&mut tx, user_id, TRASH).await?;

    let touched = store::set_trashed(&mut tx, email_id, user_id, true).await?;
    if touched == 0 {
        return Err(ApiError::not_found("email"));
    }

    membership::add_membership(&mut tx, email_id, trash_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Recover an email from trash
///
/// Clears the trash timestamp and ensures an `Inbox` membership exists.
pub async fn recover_email(
    pool: &SqlitePool,
    email_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let inbox_id = folders::resolve_id(&mut tx, user_id, INBOX).await?;

    let touched = store::set_trashed(&mut tx, email_id, user_id, false).await?;
    if touched == 0 {
        return Err(ApiError::not_found("email"));
    }

    membership::add_membership(&mut tx, email_id, inbox_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Reply to an email
///
/// The reply goes to the original sender with a `Re: ` subject and the
/// original CC string carried through unmodified. Returns the new
/// email's ID.
pub async fn reply(
    pool: &SqlitePool,
    original_email_id: i64,
    sender_id: i64,
    body: &str,
) -> Result<i64, ApiError> {
    let mut tx = pool.begin().await?;

    let original = store::get_email(&mut tx, original_email_id)
        .await?
        .ok_or_else(|| ApiError::not_found("email"))?;

    let sent_folder_id = folders::resolve_id(&mut tx, sender_id, SENT).await?;
    let email_id = deliver_copy(
        &mut tx,
        sender_id,
        original.sender_id,
        sent_folder_id,
        original.cc.as_deref(),
        &reply_subject(&original.subject),
        body,
    )
    .await?;

    tx.commit().await?;
    Ok(email_id)
}

/// Reply to an email, delivering to everyone on the original
///
/// On top of the plain reply to the original sender, the reply row also
/// gains an `Inbox` membership for each resolvable CC address on the
/// original and for the original's receiver (when that is not the
/// replier). Unresolvable CC addresses are skipped, not failed.
pub async fn reply_all(
    pool: &SqlitePool,
    original_email_id: i64,
    sender_id: i64,
    body: &str,
) -> Result<i64, ApiError> {
    let mut tx = pool.begin().await?;

    let original = store::get_email(&mut tx, original_email_id)
        .await?
        .ok_or_else(|| ApiError::not_found("email"))?;

    let sent_folder_id = folders::resolve_id(&mut tx, sender_id, SENT).await?;
    let email_id = deliver_copy(
        &mut tx,
        sender_id,
        original.sender_id,
        sent_folder_id,
        original.cc.as_deref(),
        &reply_subject(&original.subject),
        body,
    )
    .await?;

    // Lenient CC fan-in: skip addresses that no longer resolve.
    if let Some(cc) = original.cc.as_deref() {
        for address in split_cc(cc) {
            match users::find_by_email(&mut tx, address).await? {
                Some(cc_user) => {
                    let inbox_id = folders::resolve_id(&mut tx, cc_user.id, INBOX).await?;
                    membership::add_membership(&mut tx, email_id, inbox_id).await?;
                }
                None => {
                    tracing::debug!("reply-all skipping unresolved cc address {address}");
                }
            }
        }
    }

    if original.receiver_id != sender_id {
        let inbox_id = folders::resolve_id(&mut tx, original.receiver_id, INBOX).await?;
        membership::add_membership(&mut tx, email_id, inbox_id).await?;
    }

    tx.commit().await?;
    Ok(email_id)
}

/// Forward an email to new recipients
///
/// The forwarded body is the new text followed by the quoted original;
/// the subject gains a `Fwd: ` prefix and the original CC string is
/// carried on each copy. One email row per recipient, as in send.
pub async fn forward(
    pool: &SqlitePool,
    original_email_id: i64,
    sender_id: i64,
    receiver_ids: &[i64],
    body: &str,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let original = store::get_email(&mut tx, original_email_id)
        .await?
        .ok_or_else(|| ApiError::not_found("email"))?;

    let subject = forward_subject(&original.subject);
    let full_body = forward_body(body, &original.body);
    let sent_folder_id = folders::resolve_id(&mut tx, sender_id, SENT).await?;

    for &receiver_id in receiver_ids {
        deliver_copy(
            &mut tx,
            sender_id,
            receiver_id,
            sent_folder_id,
            original.cc.as_deref(),
            &subject,
            &full_body,
        )
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Create a folder for the user
pub async fn create_folder(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
) -> Result<Folder, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("folder name must not be empty".into()));
    }

    let mut conn = pool.acquire().await?;
    folders::create_folder(&mut conn, user_id, name).await
}

/// Rename a folder owned by the user
pub async fn rename_folder(
    pool: &SqlitePool,
    folder_id: i64,
    user_id: i64,
    new_name: &str,
) -> Result<(), ApiError> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(ApiError::InvalidInput("folder name must not be empty".into()));
    }

    let mut conn = pool.acquire().await?;
    folders::rename_folder(&mut conn, folder_id, user_id, new_name).await
}

/// Delete a folder owned by the user together with its memberships
pub async fn delete_folder(
    pool: &SqlitePool,
    folder_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;
    folders::delete_folder(&mut tx, folder_id, user_id).await?;
    tx.commit().await?;
    Ok(())
}

/// List the user's folders
pub async fn list_folders(pool: &SqlitePool, user_id: i64) -> Result<Vec<Folder>, ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(folders::list_folders(&mut conn, user_id).await?)
}

/// Add an email to one of the user's folders
///
/// The folder must be owned by the caller and the email must exist; the
/// membership insert itself is idempotent.
pub async fn move_email_to_folder(
    pool: &SqlitePool,
    email_id: i64,
    user_id: i64,
    folder_id: i64,
) -> Result<(), ApiError> {
    let mut conn = pool.acquire().await?;

    folders::get_owned(&mut conn, folder_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("folder"))?;

    store::get_email(&mut conn, email_id)
        .await?
        .ok_or_else(|| ApiError::not_found("email"))?;

    membership::add_membership(&mut conn, email_id, folder_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_subject_prefix() {
        assert_eq!(reply_subject("Hello"), "Re: Hello");
        // The source does not collapse stacked prefixes
        assert_eq!(reply_subject("Re: Hello"), "Re: Re: Hello");
    }

    #[test]
    fn test_forward_subject_prefix() {
        assert_eq!(forward_subject("Hello"), "Fwd: Hello");
    }

    #[test]
    fn test_forward_body_contains_marker_and_original() {
        let body = forward_body("FYI", "original text");
        assert!(body.starts_with("FYI"));
        assert!(body.contains(FORWARD_MARKER));
        assert!(body.ends_with("original text"));
    }

    #[test]
    fn test_split_cc_trims_and_drops_empties() {
        let parts: Vec<&str> = split_cc(" a@x.com , b@x.com,,  ").collect();
        assert_eq!(parts, vec!["a@x.com", "b@x.com"]);
    }
}
