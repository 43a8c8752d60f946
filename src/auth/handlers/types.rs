/**
 * Account Handler Types
 *
 * Request and response types for the signup, login, profile, and admin
 * user-management handlers. Request bodies use camelCase keys to match
 * the web client; user payloads serialize with their column names.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::{Role, User};

/// Sign up request
///
/// The mail address is not supplied by the client; it is derived as
/// `username@<mail domain>` on the server.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub second_name: String,
    pub username: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth response returned by signup and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT token for authentication
    pub token: String,
    /// The caller's role, so the client can route to the admin view
    pub role: Role,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub second_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            second_name: user.second_name,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Update-own-profile request; absent fields keep their current value
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub password: Option<String>,
}

/// Admin update-user request; absent fields keep their current value
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// Admin set-password request
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Generic status message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
