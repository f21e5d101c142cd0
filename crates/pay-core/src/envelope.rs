//! # Response Envelope
//!
//! The single response shape every adapter path produces: an HTTP status,
//! a JSON body with a `success` flag (or `ok` for preflight), and the fixed
//! CORS header set.

use crate::error::PaymentError;
use crate::order::{GatewayOrderResult, GatewayOrderStatus};
use serde::Serialize;
use serde_json::{json, Value};

/// Headers attached to every response, errors and preflight included
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub body: Value,
}

/// Body of a successful order creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedOrderBody<'a> {
    success: bool,
    payment_session_id: &'a str,
    order_id: &'a str,
}

/// Body of a successful verification
#[derive(Debug, Serialize)]
struct VerifiedOrderBody<'a> {
    success: bool,
    order_status: Option<&'a str>,
    order_amount: Option<&'a Value>,
    cf_order_id: Option<&'a Value>,
    #[serde(rename = "transactionId")]
    transaction_id: Option<&'a str>,
}

impl ResponseEnvelope {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// `{ok: true}` for CORS preflight
    pub fn preflight() -> Self {
        Self::new(200, json!({ "ok": true }))
    }

    pub fn health(service: &str, version: &str) -> Self {
        Self::new(
            200,
            json!({
                "success": true,
                "status": "healthy",
                "service": service,
                "version": version,
            }),
        )
    }

    pub fn order_created(result: &GatewayOrderResult) -> Self {
        Self::from_serializable(&CreatedOrderBody {
            success: true,
            payment_session_id: &result.payment_session_id,
            order_id: &result.order_id,
        })
    }

    pub fn order_verified(status: &GatewayOrderStatus) -> Self {
        Self::from_serializable(&VerifiedOrderBody {
            success: true,
            order_status: status.order_status.as_deref(),
            order_amount: status.order_amount.as_ref(),
            cf_order_id: status.cf_order_id.as_ref(),
            transaction_id: status.order_id.as_deref(),
        })
    }

    /// `{success: false, error}` with an explicit status
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self::new(
            status,
            json!({ "success": false, "error": message.into() }),
        )
    }

    pub fn from_error(err: &PaymentError) -> Self {
        Self::failure(err.status_code(), err.public_message())
    }

    pub fn headers(&self) -> &'static [(&'static str, &'static str)] {
        &CORS_HEADERS
    }

    fn from_serializable<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self::new(200, body),
            Err(e) => Self::from_error(&PaymentError::Serialization(e.to_string())),
        }
    }
}

impl From<PaymentError> for ResponseEnvelope {
    fn from(err: PaymentError) -> Self {
        Self::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight() {
        let envelope = ResponseEnvelope::preflight();
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.body, json!({ "ok": true }));
        assert_eq!(envelope.headers().len(), 3);
    }

    #[test]
    fn test_order_created_body() {
        let envelope = ResponseEnvelope::order_created(&GatewayOrderResult {
            order_id: "O1".into(),
            payment_session_id: "S1".into(),
            cf_order_id: None,
            order_status: Some("ACTIVE".into()),
            order_amount: None,
        });

        assert_eq!(
            envelope.body,
            json!({ "success": true, "paymentSessionId": "S1", "orderId": "O1" })
        );
    }

    #[test]
    fn test_order_verified_keeps_integer_amount() {
        let envelope = ResponseEnvelope::order_verified(&GatewayOrderStatus {
            order_id: Some("O1".into()),
            order_status: Some("PAID".into()),
            order_amount: Some(json!(500)),
            cf_order_id: Some(json!("CF1")),
        });

        assert_eq!(
            envelope.body,
            json!({
                "success": true,
                "order_status": "PAID",
                "order_amount": 500,
                "cf_order_id": "CF1",
                "transactionId": "O1"
            })
        );
        assert_eq!(envelope.body["order_amount"].to_string(), "500");
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ResponseEnvelope = PaymentError::Validation("Order ID is required".into()).into();

        assert_eq!(envelope.status, 400);
        assert_eq!(
            envelope.body,
            json!({ "success": false, "error": "Order ID is required" })
        );
    }
}
