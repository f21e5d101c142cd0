//! # Payment Error Types
//!
//! Typed error handling for the gateway adapter.
//! All payment operations return `Result<T, PaymentError>`.
//!
//! The `Display` form is for logs. What the caller sees is
//! [`PaymentError::public_message`], which never carries credentials or
//! transport-level detail.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed caller input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Gateway answered with a non-success HTTP status
    #[error("Gateway error [HTTP {status}]: {}", message.as_deref().unwrap_or("no message"))]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    Network(String),

    /// No route matches the method/path combination
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// Gateway answered successfully but the body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns true if this error is worth retrying.
    ///
    /// The adapter never retries; this only feeds log fields.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::Network(_) => true,
            PaymentError::Upstream { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::Upstream { .. } => 500,
            PaymentError::Network(_) => 500,
            PaymentError::RouteNotFound { .. } => 404,
            PaymentError::Serialization(_) => 500,
        }
    }

    /// The human-readable message placed in the response envelope.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::Configuration(message) | PaymentError::Validation(message) => {
                message.clone()
            }
            PaymentError::Upstream { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Payment gateway request failed".to_string()),
            PaymentError::Network(_) => "Failed to connect to payment gateway".to_string(),
            PaymentError::RouteNotFound { .. } => "Invalid route".to_string(),
            PaymentError::Serialization(_) => {
                "Unexpected response from payment gateway".to_string()
            }
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
