//! Error Module
//!
//! This module defines the error types surfaced by the mail workflow and
//! account layers, together with their conversion to HTTP responses.
//!
//! # Error Types
//!
//! `ApiError` covers the full failure taxonomy of the service:
//!
//! - `NotFound` - folder/email/user absent or not owned by the caller
//! - `AlreadyExists` - duplicate folder name or duplicate active identity
//! - `RecipientNotFound` - a CC address did not resolve to an active user
//! - `Unauthorized` - role check failed (e.g. non-admin calling an admin
//!   operation)
//! - `InvalidInput` - malformed request payload
//! - `Database` / `Hash` / `Token` - infrastructure failures
//!
//! # HTTP Response Conversion
//!
//! `ApiError` implements `IntoResponse`, so handlers can return it
//! directly. The error is converted to a JSON body with the appropriate
//! status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
