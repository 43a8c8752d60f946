/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user ID to handlers.
 *
 * Admin-only operations are additionally gated by `require_admin`, an
 * explicit role check evaluated in the handler after authentication.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use sqlx::SqliteConnection;

use crate::auth::sessions::verify_token;
use crate::auth::users;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data extracted from a JWT token
#[derive(Clone, Copy, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token and parses the user ID from its subject
/// 3. Confirms the user still exists and is not soft-deleted
/// 4. Attaches `AuthenticatedUser` to request extensions for handlers
///
/// Returns 401 Unauthorized if the token is missing, invalid, or refers
/// to a deleted user.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    // Format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("invalid token: {e}");
        StatusCode::UNAUTHORIZED
    })?;

    let user_id = claims.sub.parse::<i64>().map_err(|e| {
        tracing::error!("invalid user ID in token: {e}");
        StatusCode::UNAUTHORIZED
    })?;

    // A token issued before the account was soft-deleted must stop working.
    let mut conn = app_state.db_pool.acquire().await.map_err(|e| {
        tracing::error!("failed to acquire connection: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let user = users::find_by_id(&mut conn, user_id).await.map_err(|e| {
        tracing::error!("database error during auth: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if user.is_none() {
        tracing::warn!("token for unknown or deleted user {user_id}");
        return Err(StatusCode::UNAUTHORIZED);
    }
    drop(conn);

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}

/// Require the calling user to hold the admin role
///
/// Evaluated explicitly at the top of each admin handler rather than as
/// chained middleware, so the authorization rule is visible at the call
/// site. Fails with `Unauthorized` (403) for non-admins.
pub async fn require_admin(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), ApiError> {
    let user = users::find_by_id(conn, user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!("user {} denied admin access", user_id);
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}
