/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: configuration loading, store setup, and route assembly.
 *
 * # Initialization Process
 *
 * 1. Load configuration from the environment
 * 2. Open the database pool and run migrations
 * 3. Build the application state
 * 4. Create and configure the router
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::{load_database, ServerConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// The configured router and the loaded configuration (the caller needs
/// the port to bind). Fails if the store cannot be opened or migrated.
pub async fn create_app() -> Result<(Router<()>, ServerConfig), sqlx::Error> {
    tracing::info!("initializing postbox server");

    let config = ServerConfig::from_env();

    let db_pool = load_database(&config.database_url).await?;

    let app_state = AppState {
        db_pool,
        mail_domain: config.mail_domain.clone(),
    };

    let app = create_router(app_state);

    tracing::info!("router configured");

    Ok((app, config))
}
