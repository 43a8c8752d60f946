//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! - **`config`** - environment-driven configuration and store setup
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`init`** - application assembly

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
