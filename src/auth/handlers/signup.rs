/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/users/signup.
 *
 * # Registration Process
 *
 * 1. Validate the username and password
 * 2. Derive the mail address as `username@<mail domain>`
 * 3. Reject if an active user already holds that address
 * 4. Hash the password with bcrypt
 * 5. Create the user and their three default folders
 * 6. Return a JWT token for immediate authentication
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::{self, Role};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Validate username format
///
/// Usernames become the local part of the derived mail address, so they
/// must be 3-30 characters, start with a letter, and contain only
/// letters, digits, and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username or password too short
/// * `409 Conflict` - an active user with the derived address exists
/// * `500 Internal Server Error` - hashing, database, or token failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    tracing::info!("signup request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::InvalidInput(
            "username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores".to_string(),
        ));
    }

    if request.password.len() < 8 {
        return Err(ApiError::InvalidInput(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let email = format!("{}@{}", request.username, state.mail_domain);

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = users::create_user(
        &state.db_pool,
        &request.first_name,
        &request.second_name,
        &request.username,
        &email,
        &password_hash,
        Role::User,
    )
    .await?;

    let token = create_token(user.id)?;

    tracing::info!("user registered: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            role: user.role,
            user: UserResponse::from(user),
        }),
    ))
}
