/**
 * Server Configuration
 *
 * This module handles loading server configuration from the environment
 * and opening the SQLite store.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development. A `.env` file is honored when present
 * (loaded in main).
 *
 * # Error Handling
 *
 * The store is required: if the database cannot be opened or migrated,
 * startup fails instead of limping along without persistence.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite connection string
    pub database_url: String,
    /// TCP port to listen on
    pub port: u16,
    /// Domain for derived mail addresses (`username@<mail_domain>`)
    pub mail_domain: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// - `DATABASE_URL` (default `sqlite:postbox.db?mode=rwc`)
    /// - `SERVER_PORT` (default 3000)
    /// - `MAIL_DOMAIN` (default `postbox.local`)
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:postbox.db?mode=rwc".to_string());

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let mail_domain =
            std::env::var("MAIL_DOMAIN").unwrap_or_else(|_| "postbox.local".to_string());

        Self {
            database_url,
            port,
            mail_domain,
        }
    }
}

/// Open the database pool and run migrations
///
/// Foreign keys are enforced at the connection level; membership rows
/// can never reference a missing email or folder.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("connecting to database: {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await?;

    tracing::info!("database ready");
    Ok(pool)
}
