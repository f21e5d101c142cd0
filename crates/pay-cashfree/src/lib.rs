//! # pay-cashfree
//!
//! Cashfree PG client for buffbuddies-pay.
//!
//! Implements `pay_core::PaymentGateway` over the Cashfree Orders API
//! (`x-api-version: 2023-08-01`):
//!
//! - `create_order` → `POST /pg/orders`
//! - `get_order_status` → `GET /pg/orders/{order_id}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_cashfree::CashfreeGateway;
//! use pay_core::{AdapterConfig, GatewayAdapter};
//! use std::sync::Arc;
//!
//! // Sandbox unless CASHFREE_ENV=production
//! let gateway = CashfreeGateway::from_env()?;
//! let adapter = GatewayAdapter::new(Arc::new(gateway), AdapterConfig::from_env()?);
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::{CashfreeConfig, CashfreeEnvironment};
pub use gateway::CashfreeGateway;
