//! Mail Handlers Module
//!
//! HTTP handlers for the mail and folder endpoints. All routes here sit
//! behind the auth middleware; handlers receive the caller through the
//! `AuthUser` extractor and delegate to the workflow layer.

/// Request and response types
pub mod types;

/// Email endpoint handlers
pub mod emails;

/// Folder endpoint handlers
pub mod folders;

// Re-export handlers
pub use emails::{
    flag_important, forward, get_inbox, get_sent, get_trash, list_drafts, mark_read,
    mark_unread, move_email_to_folder, move_to_trash, recover_email, reply, reply_all,
    save_draft, send_email,
};
pub use folders::{create_folder, delete_folder, list_folders, rename_folder};
