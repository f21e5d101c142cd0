//! # Payment Gateway Trait
//!
//! The narrow client interface the adapter talks to. The production
//! implementation lives in `pay-cashfree`; tests substitute an in-memory fake.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          PaymentGateway (trait)          │
//! │  ├── create_order()                      │
//! │  ├── get_order_status()                  │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                      ▲
//!          ┌───────────┴───────────┐
//!  ┌───────┴───────┐       ┌───────┴───────┐
//!  │CashfreeGateway│       │  test fakes   │
//!  └───────────────┘       └───────────────┘
//! ```

use crate::config::Credentials;
use crate::error::PaymentResult;
use crate::order::{GatewayOrderResult, GatewayOrderStatus, NewOrder};
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound operations against the payment gateway.
///
/// Credentials are passed per call because they are resolved per
/// invocation, not fixed at client construction.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order and obtain a payment session for it.
    ///
    /// Errors:
    /// - `Upstream` when the gateway answers with a non-success status,
    ///   carrying the gateway's `message` when it sent one
    /// - `Network` when the gateway could not be reached or timed out
    async fn create_order(
        &self,
        credentials: &Credentials,
        order: &NewOrder,
    ) -> PaymentResult<GatewayOrderResult>;

    /// Fetch the current status of an existing order.
    async fn get_order_status(
        &self,
        credentials: &Credentials,
        order_id: &str,
    ) -> PaymentResult<GatewayOrderStatus>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
