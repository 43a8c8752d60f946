//! Postbox - Webmail Backend
//!
//! Postbox is a webmail backend: a REST API managing users,
//! authentication, emails, and folders over a relational store. There is
//! no SMTP or IMAP here; mail exists between accounts of the same
//! instance, addressed as `username@<mail domain>`.
//!
//! # Module Structure
//!
//! - **`server`** - configuration, application state, app assembly
//! - **`routes`** - HTTP route tables
//! - **`middleware`** - JWT authentication and the admin predicate
//! - **`auth`** - user identity, sessions, account handlers
//! - **`mail`** - the email core: messages, folders, memberships, and
//!   the workflow engine (send, reply, forward, trash, drafts)
//! - **`error`** - the `ApiError` taxonomy and its HTTP conversion
//!
//! # Data Model
//!
//! Emails live in one shared table; per-user folder placement is a
//! many-to-many association. A message sent to several recipients is
//! stored as one row per recipient, so read/important/trash state is
//! per-recipient by construction. Users, like emails, are soft-deleted
//! only.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Request middleware
pub mod middleware;

/// Authentication and account management
pub mod auth;

/// The email core
pub mod mail;

/// Error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::{create_app, AppState};
