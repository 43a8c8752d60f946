/**
 * Admin User-Management Handlers
 *
 * Handlers for the admin surface: listing users, editing a user's names
 * and role, resetting a password, and soft-deleting an account. Every
 * handler evaluates `require_admin` before touching the target, so the
 * authorization rule is visible at each call site.
 *
 * Deleting a user never removes their mail; the account is timestamped
 * and the emails they sent or received are flagged instead.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{
    AdminUpdateUserRequest, MessageResponse, UpdatePasswordRequest, UserResponse,
};
use crate::auth::users;
use crate::error::ApiError;
use crate::middleware::{require_admin, AuthUser};
use crate::server::state::AppState;

/// List all active users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;
    require_admin(&mut conn, auth.user_id).await?;

    let list = users::list_active(&mut conn).await?;

    Ok(Json(list.into_iter().map(UserResponse::from).collect()))
}

/// Update a user's names and role; optionally reset their password
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<AdminUpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;
    require_admin(&mut conn, auth.user_id).await?;

    let user = users::find_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    let first_name = request.first_name.unwrap_or(user.first_name);
    let second_name = request.second_name.unwrap_or(user.second_name);
    let role = request.role.unwrap_or(user.role);

    users::update_user(
        &mut conn,
        user_id,
        &first_name,
        &second_name,
        &user.username,
        &user.email,
        role,
    )
    .await?;

    if let Some(password) = request.password {
        let password_hash = hash(&password, DEFAULT_COST)?;
        users::update_password(&mut conn, user_id, &password_hash).await?;
    }

    tracing::info!("admin {} updated user {}", auth.user_id, user_id);

    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// Reset a user's password
pub async fn update_user_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;
    require_admin(&mut conn, auth.user_id).await?;

    users::find_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    let password_hash = hash(&request.password, DEFAULT_COST)?;
    users::update_password(&mut conn, user_id, &password_hash).await?;

    tracing::info!("admin {} reset password for user {}", auth.user_id, user_id);

    Ok(Json(MessageResponse::new(
        "User password updated successfully",
    )))
}

/// Soft-delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = state.db_pool.acquire().await?;
    require_admin(&mut conn, auth.user_id).await?;

    users::find_by_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    drop(conn);
    users::soft_delete_user(&state.db_pool, user_id).await?;

    tracing::info!("admin {} deleted user {}", auth.user_id, user_id);

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
