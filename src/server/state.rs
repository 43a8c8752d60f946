/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * `FromRef` so handlers can extract the pieces they need.
 *
 * # Thread Safety
 *
 * `SqlitePool` is internally reference-counted and safe to clone across
 * handlers; the mail domain is immutable after startup. There is no
 * other in-process shared mutable state: every operation goes through
 * the store.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Domain for derived mail addresses
    pub mail_domain: String,
}

/// Allow handlers to extract the pool directly via `State<SqlitePool>`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
