/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/users/login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by mail address (active users only)
 * 2. Verify the password using bcrypt
 * 3. Generate a JWT token
 * 4. Return the token together with the user's role
 *
 * # Security
 *
 * - Unknown address and wrong password return the same error, so the
 *   endpoint cannot be used to enumerate accounts
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown address or wrong password
/// * `500 Internal Server Error` - database or token failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("login request for: {}", request.email);

    let mut conn = state.db_pool.acquire().await?;

    let user = users::find_by_email(&mut conn, &request.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&request.password, &user.password_hash)?;
    if !valid {
        tracing::warn!("invalid password for user: {}", request.email);
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(user.id)?;

    tracing::info!("user logged in: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        role: user.role,
        user: UserResponse::from(user),
    }))
}
