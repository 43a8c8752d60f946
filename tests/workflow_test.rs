//! Mail workflow integration tests
//!
//! Exercises the workflow engine end to end against an in-memory store:
//! folder provisioning, send with CC fan-out, trash/recover, reply,
//! reply-all, forward, drafts, and folder management.

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use postbox::error::ApiError;
use postbox::mail::folders::{INBOX, SENT, TRASH};
use postbox::mail::workflow;

use common::{
    create_test_user, email_count, folder_id, membership_count, total_membership_count,
    TestDatabase,
};

#[tokio::test]
async fn fresh_user_gets_exactly_the_three_default_folders() {
    let db = TestDatabase::new().await;
    let user = create_test_user(db.pool(), "alice").await;

    let folders = workflow::list_folders(db.pool(), user.id).await.unwrap();

    let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![INBOX, SENT, TRASH]);
    assert!(folders.iter().all(|f| f.user_id == user.id));
}

#[tokio::test]
async fn send_creates_one_row_and_two_memberships() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();

    assert_eq!(email_count(db.pool()).await, 1);
    assert_eq!(total_membership_count(db.pool()).await, 2);

    let sent = workflow::get_sent(db.pool(), alice.id).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].sender_id, alice.id);
    assert_eq!(sent[0].receiver_id, bob.id);
    assert_eq!(sent[0].subject, "Hi");
    assert!(!sent[0].is_read);

    let alice_sent = folder_id(db.pool(), alice.id, SENT).await;
    let bob_inbox = folder_id(db.pool(), bob.id, INBOX).await;
    assert_eq!(membership_count(db.pool(), sent[0].id, alice_sent).await, 1);
    assert_eq!(membership_count(db.pool(), sent[0].id, bob_inbox).await, 1);

    let inbox = workflow::get_inbox(db.pool(), bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, sent[0].id);
}

#[tokio::test]
async fn send_with_cc_creates_a_copy_for_the_cc_recipient() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let carol = create_test_user(db.pool(), "carol").await;

    workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        Some("carol@postbox.local"),
        "Hi",
        "Body",
        None,
    )
    .await
    .unwrap();

    // One row for the primary recipient, one independent copy for the CC
    assert_eq!(email_count(db.pool()).await, 2);

    let carol_inbox = workflow::get_inbox(db.pool(), carol.id).await.unwrap();
    assert_eq!(carol_inbox.len(), 1);
    assert_eq!(carol_inbox[0].receiver_id, carol.id);
    assert_eq!(carol_inbox[0].cc.as_deref(), Some("carol@postbox.local"));

    let alice_sent_folder = folder_id(db.pool(), alice.id, SENT).await;
    let carol_inbox_folder = folder_id(db.pool(), carol.id, INBOX).await;
    assert_eq!(
        membership_count(db.pool(), carol_inbox[0].id, alice_sent_folder).await,
        1
    );
    assert_eq!(
        membership_count(db.pool(), carol_inbox[0].id, carol_inbox_folder).await,
        1
    );

    // Both copies show up in the sender's Sent view
    let sent = workflow::get_sent(db.pool(), alice.id).await.unwrap();
    assert_eq!(sent.len(), 2);
}

#[tokio::test]
async fn send_with_unresolvable_cc_fails_and_leaves_no_rows() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    let err = workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        Some("nobody@postbox.local"),
        "Hi",
        "Body",
        None,
    )
    .await
    .unwrap_err();

    assert_matches!(err, ApiError::RecipientNotFound(addr) if addr == "nobody@postbox.local");
    assert_eq!(email_count(db.pool()).await, 0);
    assert_eq!(total_membership_count(db.pool()).await, 0);
}

#[tokio::test]
async fn double_trash_keeps_a_single_membership_row() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    workflow::move_to_trash(db.pool(), email_id, bob.id).await.unwrap();
    workflow::move_to_trash(db.pool(), email_id, bob.id).await.unwrap();

    let bob_trash = folder_id(db.pool(), bob.id, TRASH).await;
    assert_eq!(membership_count(db.pool(), email_id, bob_trash).await, 1);
}

#[tokio::test]
async fn recover_clears_trash_state_and_restores_the_inbox() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    workflow::move_to_trash(db.pool(), email_id, bob.id).await.unwrap();
    assert_eq!(workflow::get_inbox(db.pool(), bob.id).await.unwrap().len(), 0);
    assert_eq!(workflow::get_trash(db.pool(), bob.id).await.unwrap().len(), 1);

    workflow::recover_email(db.pool(), email_id, bob.id).await.unwrap();

    let trash = workflow::get_trash(db.pool(), bob.id).await.unwrap();
    assert_eq!(trash.len(), 0);

    let inbox = workflow::get_inbox(db.pool(), bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, email_id);
    assert!(inbox[0].deleted_at.is_none());

    let bob_inbox = folder_id(db.pool(), bob.id, INBOX).await;
    assert_eq!(membership_count(db.pool(), email_id, bob_inbox).await, 1);
}

#[tokio::test]
async fn trash_of_someone_elses_email_fails() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let mallory = create_test_user(db.pool(), "mallory").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    let err = workflow::move_to_trash(db.pool(), email_id, mallory.id)
        .await
        .unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));

    let inbox = workflow::get_inbox(db.pool(), bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn reply_goes_back_to_the_sender_with_derived_fields() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let _carol = create_test_user(db.pool(), "carol").await;

    workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        Some("carol@postbox.local"),
        "Plans",
        "Body",
        None,
    )
    .await
    .unwrap();
    let original_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    let reply_id = workflow::reply(db.pool(), original_id, bob.id, "Sounds good")
        .await
        .unwrap();

    let alice_inbox = workflow::get_inbox(db.pool(), alice.id).await.unwrap();
    assert_eq!(alice_inbox.len(), 1);
    assert_eq!(alice_inbox[0].id, reply_id);
    assert_eq!(alice_inbox[0].sender_id, bob.id);
    assert_eq!(alice_inbox[0].receiver_id, alice.id);
    assert_eq!(alice_inbox[0].subject, "Re: Plans");
    assert_eq!(alice_inbox[0].cc.as_deref(), Some("carol@postbox.local"));
    assert_eq!(alice_inbox[0].body, "Sounds good");

    let bob_sent = workflow::get_sent(db.pool(), bob.id).await.unwrap();
    assert_eq!(bob_sent.len(), 1);
    assert_eq!(bob_sent[0].id, reply_id);
}

#[tokio::test]
async fn reply_to_missing_email_fails() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;

    let err = workflow::reply(db.pool(), 9999, alice.id, "hello?").await.unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));
}

#[tokio::test]
async fn reply_all_reaches_cc_users_and_skips_unknown_addresses() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let carol = create_test_user(db.pool(), "carol").await;

    // A stale address in the CC list must not break the reply
    workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        Some("carol@postbox.local"),
        "Plans",
        "Body",
        None,
    )
    .await
    .unwrap();
    let original_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    sqlx::query("UPDATE emails SET cc = ? WHERE id = ?")
        .bind("carol@postbox.local, gone@postbox.local")
        .bind(original_id)
        .execute(db.pool())
        .await
        .unwrap();

    let reply_id = workflow::reply_all(db.pool(), original_id, bob.id, "All hands")
        .await
        .unwrap();

    // Original sender and CC user both see the reply
    let alice_inbox = workflow::get_inbox(db.pool(), alice.id).await.unwrap();
    assert_eq!(alice_inbox.len(), 1);
    assert_eq!(alice_inbox[0].id, reply_id);

    let carol_inbox_folder = folder_id(db.pool(), carol.id, INBOX).await;
    assert_eq!(membership_count(db.pool(), reply_id, carol_inbox_folder).await, 1);
}

#[tokio::test]
async fn reply_all_adds_the_original_receiver_when_replier_is_the_cc_user() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let carol = create_test_user(db.pool(), "carol").await;

    workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        Some("carol@postbox.local"),
        "Plans",
        "Body",
        None,
    )
    .await
    .unwrap();

    // Carol replies-all from her CC copy; Bob is that row's receiver
    let carol_copy_id = workflow::get_inbox(db.pool(), carol.id).await.unwrap()[0].id;
    let reply_id = workflow::reply_all(db.pool(), carol_copy_id, carol.id, "Me too")
        .await
        .unwrap();

    let bob_inbox_folder = folder_id(db.pool(), bob.id, INBOX).await;
    assert_eq!(membership_count(db.pool(), reply_id, bob_inbox_folder).await, 0);

    // The CC copy's receiver is Carol herself, so only Alice (the original
    // sender) and the CC list gain the reply; Carol's own inbox membership
    // comes from her address being in the carried CC string.
    let alice_inbox = workflow::get_inbox(db.pool(), alice.id).await.unwrap();
    assert_eq!(alice_inbox.len(), 1);
    assert_eq!(alice_inbox[0].id, reply_id);
}

#[tokio::test]
async fn forward_quotes_the_original_body_behind_the_marker() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;
    let dave = create_test_user(db.pool(), "dave").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Plans", "original text", None)
        .await
        .unwrap();
    let original_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    workflow::forward(db.pool(), original_id, bob.id, &[dave.id], "FYI")
        .await
        .unwrap();

    let dave_inbox = workflow::get_inbox(db.pool(), dave.id).await.unwrap();
    assert_eq!(dave_inbox.len(), 1);
    assert_eq!(dave_inbox[0].subject, "Fwd: Plans");
    assert!(dave_inbox[0].body.starts_with("FYI"));
    assert!(dave_inbox[0].body.contains("--- Forwarded message ---"));
    assert!(dave_inbox[0].body.ends_with("original text"));
    assert_eq!(dave_inbox[0].sender_id, bob.id);
}

#[tokio::test]
async fn draft_is_consumed_when_sent() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    let draft_id = workflow::save_draft(
        db.pool(),
        alice.id,
        &[bob.id],
        None,
        "Half-written",
        "wip",
    )
    .await
    .unwrap();

    let drafts = workflow::list_drafts(db.pool(), alice.id).await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft_id);
    assert_eq!(drafts[0].recipient_ids(), vec![bob.id]);

    // No folder placement until the draft is sent
    assert_eq!(email_count(db.pool()).await, 0);

    workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        None,
        "Half-written",
        "done now",
        Some(draft_id),
    )
    .await
    .unwrap();

    assert_eq!(workflow::list_drafts(db.pool(), alice.id).await.unwrap().len(), 0);
    let inbox = workflow::get_inbox(db.pool(), bob.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].body, "done now");
}

#[tokio::test]
async fn send_with_unknown_draft_fails_without_sending() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    let err = workflow::send_email(
        db.pool(),
        alice.id,
        &[bob.id],
        None,
        "Hi",
        "Body",
        Some(4242),
    )
    .await
    .unwrap_err();

    assert_matches!(err, ApiError::NotFound(_));
    assert_eq!(email_count(db.pool()).await, 0);
}

#[tokio::test]
async fn foreign_drafts_cannot_be_sent() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    let draft_id = workflow::save_draft(db.pool(), alice.id, &[bob.id], None, "s", "b")
        .await
        .unwrap();

    let err = workflow::send_email(db.pool(), bob.id, &[alice.id], None, "s", "b", Some(draft_id))
        .await
        .unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));

    // Alice still owns her draft
    assert_eq!(workflow::list_drafts(db.pool(), alice.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn read_flag_is_receiver_scoped_and_idempotent() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    // The sender cannot mark the receiver's copy read; the call no-ops
    workflow::mark_read(db.pool(), email_id, alice.id).await.unwrap();
    assert!(!workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].is_read);

    workflow::mark_read(db.pool(), email_id, bob.id).await.unwrap();
    assert!(workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].is_read);

    workflow::mark_unread(db.pool(), email_id, bob.id).await.unwrap();
    assert!(!workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].is_read);
}

#[tokio::test]
async fn important_flag_works_for_sender_and_receiver() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_sent(db.pool(), alice.id).await.unwrap()[0].id;

    workflow::flag_important(db.pool(), email_id, alice.id).await.unwrap();
    assert!(workflow::get_sent(db.pool(), alice.id).await.unwrap()[0].is_important);
}

#[tokio::test]
async fn inbox_lists_newest_first() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "first", "1", None)
        .await
        .unwrap();
    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "second", "2", None)
        .await
        .unwrap();

    let inbox = workflow::get_inbox(db.pool(), bob.id).await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].subject, "second");
    assert_eq!(inbox[1].subject, "first");
}

#[tokio::test]
async fn duplicate_folder_name_is_rejected() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;

    workflow::create_folder(db.pool(), alice.id, "Receipts").await.unwrap();
    let err = workflow::create_folder(db.pool(), alice.id, "Receipts")
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::AlreadyExists(_));
    assert_eq!(workflow::list_folders(db.pool(), alice.id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn same_folder_name_is_fine_across_users() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::create_folder(db.pool(), alice.id, "Receipts").await.unwrap();
    workflow::create_folder(db.pool(), bob.id, "Receipts").await.unwrap();
}

#[tokio::test]
async fn folder_operations_are_ownership_checked() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    let folder = workflow::create_folder(db.pool(), alice.id, "Receipts").await.unwrap();

    let err = workflow::delete_folder(db.pool(), folder.id, bob.id).await.unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));

    let err = workflow::rename_folder(db.pool(), folder.id, bob.id, "Stolen")
        .await
        .unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));

    // The folder is untouched
    let folders = workflow::list_folders(db.pool(), alice.id).await.unwrap();
    assert!(folders.iter().any(|f| f.id == folder.id && f.name == "Receipts"));
}

#[tokio::test]
async fn default_folders_cannot_be_renamed_or_deleted() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;

    let inbox = folder_id(db.pool(), alice.id, INBOX).await;

    let err = workflow::delete_folder(db.pool(), inbox, alice.id).await.unwrap_err();
    assert_matches!(err, ApiError::InvalidInput(_));

    let err = workflow::rename_folder(db.pool(), inbox, alice.id, "Mailbox")
        .await
        .unwrap_err();
    assert_matches!(err, ApiError::InvalidInput(_));

    assert_eq!(workflow::list_folders(db.pool(), alice.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn deleting_a_folder_removes_its_memberships() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    let folder = workflow::create_folder(db.pool(), bob.id, "Keep").await.unwrap();
    workflow::move_email_to_folder(db.pool(), email_id, bob.id, folder.id)
        .await
        .unwrap();
    assert_eq!(membership_count(db.pool(), email_id, folder.id).await, 1);

    workflow::delete_folder(db.pool(), folder.id, bob.id).await.unwrap();
    assert_eq!(membership_count(db.pool(), email_id, folder.id).await, 0);
}

#[tokio::test]
async fn moving_an_email_twice_keeps_one_membership() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    let folder = workflow::create_folder(db.pool(), bob.id, "Keep").await.unwrap();
    workflow::move_email_to_folder(db.pool(), email_id, bob.id, folder.id)
        .await
        .unwrap();
    workflow::move_email_to_folder(db.pool(), email_id, bob.id, folder.id)
        .await
        .unwrap();

    assert_eq!(membership_count(db.pool(), email_id, folder.id).await, 1);
}

#[tokio::test]
async fn moving_into_someone_elses_folder_fails() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(db.pool(), "alice").await;
    let bob = create_test_user(db.pool(), "bob").await;

    workflow::send_email(db.pool(), alice.id, &[bob.id], None, "Hi", "Body", None)
        .await
        .unwrap();
    let email_id = workflow::get_inbox(db.pool(), bob.id).await.unwrap()[0].id;

    let alice_folder = workflow::create_folder(db.pool(), alice.id, "Private").await.unwrap();

    let err = workflow::move_email_to_folder(db.pool(), email_id, bob.id, alice_folder.id)
        .await
        .unwrap_err();
    assert_matches!(err, ApiError::NotFound(_));
}
