//! Account Handlers Module
//!
//! HTTP handlers for the account endpoints.
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/users/signup - User registration
//! - **`login`** - POST /api/users/login - User authentication
//! - **`get_profile`** / **`update_profile`** - GET/PUT /api/users/profile
//! - **`list_users`**, **`update_user`**, **`update_user_password`**,
//!   **`delete_user`** - the admin surface under /api/users
//!
//! Signup and login are public; everything else requires a valid token,
//! and the admin handlers additionally require the admin role.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Own-profile handlers
pub mod profile;

/// Admin user-management handlers
pub mod admin;

// Re-export commonly used types
pub use types::{
    AdminUpdateUserRequest, AuthResponse, LoginRequest, MessageResponse, SignupRequest,
    UpdatePasswordRequest, UpdateProfileRequest, UserResponse,
};

// Re-export handlers
pub use admin::{delete_user, list_users, update_user, update_user_password};
pub use login::login;
pub use profile::{get_profile, update_profile};
pub use signup::signup;
