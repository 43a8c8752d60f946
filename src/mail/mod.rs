//! Mail Module
//!
//! The email core: canonical message storage, per-user folders, the
//! membership index associating messages with folders, and the workflow
//! engine that composes them.
//!
//! # Architecture
//!
//! The module is layered bottom-up:
//!
//! - **`email`** - the `Email` and `Draft` models
//! - **`folders`** - per-user named folders; `Inbox`, `Sent`, and
//!   `Recent Delete` are provisioned with the user and protected
//! - **`store`** - email row and draft persistence, flag updates scoped
//!   to the caller's relationship to the row
//! - **`membership`** - the (email, folder) association table and the
//!   folder listing queries
//! - **`workflow`** - send, reply, reply-all, forward, trash, recover,
//!   and draft promotion; every write runs in one transaction
//! - **`handlers`** - the HTTP boundary mapping requests onto workflow
//!   operations
//!
//! # Data model
//!
//! A message sent to several people is stored as one email row per
//! recipient (To and CC alike), each row independently placed in the
//! sender's `Sent` folder and the recipient's `Inbox`. Read, important,
//! and trash state live on the row, so they are always scoped to one
//! user's view. Trashing adds a `Recent Delete` membership without
//! removing the original one; the composite key on the membership table
//! keeps repeated trash/recover cycles from accumulating duplicates.

/// Email and draft models
pub mod email;

/// Folder registry
pub mod folders;

/// Message store
pub mod store;

/// Folder-membership index
pub mod membership;

/// Mail workflow engine
pub mod workflow;

/// HTTP handlers for mail and folder endpoints
pub mod handlers;

// Re-export commonly used types
pub use email::{Draft, Email};
pub use folders::Folder;
