//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routing is decided by the adapter, so every request lands on one
/// fallback handler:
/// - `OPTIONS *` - CORS preflight
/// - `GET *` - Health check
/// - `POST .../verify/{order_id}` - Verify a payment order
/// - `POST *` - Create a payment order
/// - anything else - 404 `Invalid route`
///
/// CORS headers are part of every envelope, so no `CorsLayer` is needed.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::dispatch)
        // Middleware
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // State
        .with_state(state)
}
