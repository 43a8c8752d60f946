//! Authentication and Account Module
//!
//! This module handles user identity, registration, and session
//! management. It provides HTTP handlers for the account endpoints and
//! owns the user table.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations; creating a user
//!   also provisions their three default mail folders
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for signup, login, profile, and the
//!   admin user-management surface
//!
//! # Authentication Flow
//!
//! 1. **Signup**: names + username + password → user created with
//!    derived address → JWT token returned
//! 2. **Login**: address + password → credentials verified → JWT token
//!    and role returned
//! 3. Subsequent requests carry `Authorization: Bearer <token>` and are
//!    resolved to a user by the auth middleware
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after one hour
//! - Invalid credentials return 401 without saying which part was wrong
//! - Deleting an account is a soft delete; its tokens stop working
//!   because the middleware re-checks the user on every request

/// User model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for account endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use users::{Role, User};
