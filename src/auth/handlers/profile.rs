/**
 * Profile Handlers
 *
 * Handlers for GET /api/users/profile and PUT /api/users/profile: the
 * authenticated user reading and updating their own account. Username,
 * address, and role are fixed from this surface; only the names and the
 * password can change, and absent fields keep their current value.
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{MessageResponse, UpdateProfileRequest, UserResponse};
use crate::auth::users;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::server::state::AppState;

/// Get the authenticated user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;

    let user = users::find_by_id(&mut conn, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;

    let user = users::find_by_id(&mut conn, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    let first_name = request.first_name.unwrap_or(user.first_name);
    let second_name = request.second_name.unwrap_or(user.second_name);

    users::update_user(
        &mut conn,
        auth.user_id,
        &first_name,
        &second_name,
        &user.username,
        &user.email,
        user.role,
    )
    .await?;

    if let Some(password) = request.password {
        if password.len() < 8 {
            return Err(ApiError::InvalidInput(
                "password must be at least 8 characters".to_string(),
            ));
        }
        let password_hash = hash(&password, DEFAULT_COST)?;
        users::update_password(&mut conn, auth.user_id, &password_hash).await?;
    }

    tracing::info!("user {} updated profile", auth.user_id);

    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
