//! Middleware Module
//!
//! HTTP middleware for the server. Currently provides the authentication
//! middleware that guards every route except signup and login, plus the
//! admin predicate evaluated by handlers that expose admin operations.

pub mod auth;

pub use auth::{auth_middleware, require_admin, AuthUser, AuthenticatedUser};
