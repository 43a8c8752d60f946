/**
 * Service Error Types
 *
 * This module defines the typed failures produced by the account layer and
 * the mail workflow engine. Handlers surface these to the HTTP boundary,
 * which maps each variant to a transport status code.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Typed failures surfaced by account and mail operations
///
/// Each variant carries enough context for a useful client-facing message.
/// Database, hashing, and token errors are wrapped transparently and map
/// to 500 responses without leaking internals.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A folder, email, or user was absent or not owned by the caller
    #[error("{0} not found")]
    NotFound(String),

    /// A duplicate folder name or duplicate active identity
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A CC address did not resolve to an active user during send
    #[error("recipient {0} not found")]
    RecipientNotFound(String),

    /// Role check failed
    #[error("access denied")]
    Unauthorized,

    /// Login failed; deliberately does not say which part was wrong
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Malformed request payload
    #[error("{0}")]
    InvalidInput(String),

    /// Database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token issuance failure
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Shorthand for a `NotFound` with a named subject
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Shorthand for an `AlreadyExists` with a named subject
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `AlreadyExists` - 409 Conflict
    /// - `RecipientNotFound` - 422 Unprocessable Entity
    /// - `Unauthorized` - 403 Forbidden
    /// - `InvalidCredentials` - 401 Unauthorized
    /// - `InvalidInput` - 400 Bad Request
    /// - `Database` / `Hash` / `Token` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::RecipientNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Hash(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing error message
    ///
    /// Infrastructure failures are collapsed to a generic message; the
    /// full error is logged at the point of conversion instead.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Hash(_) | Self::Token(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
