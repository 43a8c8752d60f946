/**
 * Mail Route Configuration
 *
 * Route table for the email and folder endpoints under /api/emails.
 * Every route here requires authentication; the router applies the auth
 * middleware to the whole table.
 */

use axum::{routing, Router};

use crate::mail::handlers::{
    create_folder, delete_folder, flag_important, forward, get_inbox, get_sent, get_trash,
    list_drafts, list_folders, mark_read, mark_unread, move_email_to_folder, move_to_trash,
    recover_email, rename_folder, reply, reply_all, save_draft, send_email,
};
use crate::server::state::AppState;

/// Authenticated mail routes
///
/// ## Email routes
///
/// - `POST /api/emails/send` - send (optionally consuming a draft)
/// - `GET /api/emails/inbox` / `sent` / `trash` - folder listings
/// - `GET|POST /api/emails/drafts` - list / save drafts
/// - `PUT /api/emails/read/{id}` / `unread/{id}` - read flag
/// - `PUT /api/emails/important/{id}` - important flag
/// - `PUT /api/emails/trash/{id}` / `recover/{id}` - trash lifecycle
/// - `PUT /api/emails/move/{email_id}/folder/{folder_id}` - file an email
/// - `POST /api/emails/reply/{id}` / `reply-all/{id}` / `forward/{id}`
///
/// ## Folder routes
///
/// - `GET|POST /api/emails/folders` - list / create
/// - `PUT|DELETE /api/emails/folders/{id}` - rename / delete
pub fn mail_routes() -> Router<AppState> {
    Router::new()
        .route("/api/emails/send", routing::post(send_email))
        .route("/api/emails/inbox", routing::get(get_inbox))
        .route("/api/emails/sent", routing::get(get_sent))
        .route("/api/emails/trash", routing::get(get_trash))
        .route(
            "/api/emails/drafts",
            routing::get(list_drafts).post(save_draft),
        )
        .route("/api/emails/read/{id}", routing::put(mark_read))
        .route("/api/emails/unread/{id}", routing::put(mark_unread))
        .route("/api/emails/important/{id}", routing::put(flag_important))
        .route("/api/emails/trash/{id}", routing::put(move_to_trash))
        .route("/api/emails/recover/{id}", routing::put(recover_email))
        .route(
            "/api/emails/move/{email_id}/folder/{folder_id}",
            routing::put(move_email_to_folder),
        )
        .route("/api/emails/reply/{id}", routing::post(reply))
        .route("/api/emails/reply-all/{id}", routing::post(reply_all))
        .route("/api/emails/forward/{id}", routing::post(forward))
        .route(
            "/api/emails/folders",
            routing::get(list_folders).post(create_folder),
        )
        .route(
            "/api/emails/folders/{id}",
            routing::put(rename_folder).delete(delete_folder),
        )
}
