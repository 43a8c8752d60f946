/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route tables into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public account routes (signup, login)
 * 2. Protected routes (profile, admin, mail, folders) behind the auth
 *    middleware
 * 3. Welcome route and 404 fallback
 *
 * Request tracing and CORS are applied to everything.
 */

use axum::{middleware, routing, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::routes::mail_routes::mail_routes;
use crate::routes::user_routes::{protected_user_routes, public_user_routes};
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (database pool, mail domain)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = protected_user_routes()
        .merge(mail_routes())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    public_user_routes()
        .merge(protected)
        .route(
            "/",
            routing::get(|| async { "Welcome to the Postbox API" }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .with_state(app_state)
}
