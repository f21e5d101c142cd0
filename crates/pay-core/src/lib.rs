//! # pay-core
//!
//! Core of the buffbuddies payment adapter.
//!
//! This crate provides:
//! - `GatewayAdapter`, which routes an inbound request, validates it, calls
//!   the gateway and returns a `ResponseEnvelope`
//! - `PaymentGateway` trait for the outbound gateway client
//! - `Route` classification and verify-path parsing
//! - `OrderRequest`, `NewOrder` and the gateway result types
//! - `AdapterConfig` / `Credentials` for injected configuration
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{AdapterConfig, GatewayAdapter, InboundRequest};
//! use serde_json::json;
//!
//! let adapter = GatewayAdapter::new(gateway, AdapterConfig::from_env()?);
//!
//! let request = InboundRequest::new("POST", "/").with_body(json!({
//!     "orderId": "BB-1001",
//!     "orderAmount": 499,
//!     "customerName": "Asha",
//!     "customerPhone": "9876543210",
//! }));
//!
//! let envelope = adapter.handle(&request).await;
//! // envelope.status == 200, envelope.body["paymentSessionId"] == "..."
//! ```

pub mod adapter;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod order;
pub mod route;

// Re-exports for convenience
pub use adapter::{GatewayAdapter, InboundRequest, RequestBody, SERVICE_NAME};
pub use config::{AdapterConfig, Credentials, OrderSettings};
pub use envelope::{ResponseEnvelope, CORS_HEADERS};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use order::{
    CustomerDetails, GatewayOrderResult, GatewayOrderStatus, NewOrder, OrderRequest,
    ORDER_CURRENCY,
};
pub use route::{verify_order_id, Route};
