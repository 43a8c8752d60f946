/**
 * User Route Configuration
 *
 * Route tables for the account endpoints under /api/users. Signup and
 * login are public; the profile and admin routes are returned separately
 * so the router can put them behind the auth middleware.
 */

use axum::{routing, Router};

use crate::auth::handlers::{
    delete_user, get_profile, list_users, login, signup, update_profile, update_user,
    update_user_password,
};
use crate::server::state::AppState;

/// Public account routes
///
/// - `POST /api/users/signup` - User registration
/// - `POST /api/users/login` - User login
pub fn public_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/signup", routing::post(signup))
        .route("/api/users/login", routing::post(login))
}

/// Authenticated account routes
///
/// - `GET /api/users/profile` / `PUT /api/users/profile` - own profile
/// - `GET /api/users` - list users (admin)
/// - `PUT /api/users/{id}` - update a user (admin)
/// - `PUT /api/users/{id}/password` - reset a password (admin)
/// - `DELETE /api/users/{id}` - soft-delete a user (admin)
///
/// The admin routes authenticate like any other route; the role check
/// happens inside the handlers via `require_admin`.
pub fn protected_user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/profile",
            routing::get(get_profile).put(update_profile),
        )
        .route("/api/users", routing::get(list_users))
        .route(
            "/api/users/{id}",
            routing::put(update_user).delete(delete_user),
        )
        .route(
            "/api/users/{id}/password",
            routing::put(update_user_password),
        )
}
