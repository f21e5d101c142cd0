//! # pay-api
//!
//! HTTP host for the buffbuddies payment adapter.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - A catch-all handler feeding requests to `pay_core::GatewayAdapter`
//! - Process configuration and state wiring for the Cashfree gateway
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | OPTIONS | any | CORS preflight |
//! | GET | any | Health check |
//! | POST | `/verify/{order_id}` | Verify payment order |
//! | POST | any other | Create payment order |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
