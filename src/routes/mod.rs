//! Route Configuration Module
//!
//! HTTP route tables for the server, organized by surface:
//!
//! - **`router`** - main router assembly (middleware, tracing, CORS)
//! - **`user_routes`** - account endpoints under /api/users
//! - **`mail_routes`** - email and folder endpoints under /api/emails

/// Main router creation
pub mod router;

/// Account route tables
pub mod user_routes;

/// Mail route tables
pub mod mail_routes;

// Re-export commonly used functions
pub use router::create_router;
