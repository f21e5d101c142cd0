//! # Order Types
//!
//! Inbound order requests, the resolved order handed to a gateway, and the
//! results a gateway hands back.

use crate::config::OrderSettings;
use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// The only currency the gateway account settles in
pub const ORDER_CURRENCY: &str = "INR";

/// Message returned when the create body is not a JSON object
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body. Expected JSON.";

/// A validated create-order request from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Caller-supplied unique order key
    pub order_id: String,

    /// Order amount, always positive
    pub order_amount: Number,

    pub customer_name: String,

    pub customer_phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,
}

impl OrderRequest {
    /// Validate a parsed JSON body into an order request.
    ///
    /// Required fields must be present and truthy: `null`, `false`, `0` and
    /// `""` all count as missing. String fields also accept numbers.
    pub fn from_json(body: &Value) -> PaymentResult<Self> {
        let fields = body
            .as_object()
            .ok_or_else(|| PaymentError::Validation(INVALID_BODY_MESSAGE.to_string()))?;

        let order_id = text_field(fields, "orderId");
        let customer_name = text_field(fields, "customerName");
        let customer_phone = text_field(fields, "customerPhone");
        let raw_amount = fields.get("orderAmount").filter(|v| is_truthy(v));

        let missing: Vec<&str> = [
            ("orderId", order_id.is_none()),
            ("orderAmount", raw_amount.is_none()),
            ("customerName", customer_name.is_none()),
            ("customerPhone", customer_phone.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(PaymentError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let order_amount = raw_amount.and_then(coerce_amount).ok_or_else(|| {
            PaymentError::Validation("orderAmount must be a positive number".to_string())
        })?;

        // The missing check above guarantees these are present.
        let (Some(order_id), Some(customer_name), Some(customer_phone)) =
            (order_id, customer_name, customer_phone)
        else {
            return Err(PaymentError::Validation(
                "Missing required fields".to_string(),
            ));
        };

        Ok(Self {
            order_id,
            order_amount,
            customer_name,
            customer_phone,
            customer_email: text_field(fields, "customerEmail"),
            order_note: text_field(fields, "orderNote"),
        })
    }

    /// Resolve defaults and build the order sent to the gateway
    pub fn into_new_order(self, settings: &OrderSettings) -> NewOrder {
        let customer_email = self
            .customer_email
            .unwrap_or_else(|| format!("{}@{}", self.customer_phone, settings.email_domain));

        NewOrder {
            return_url: settings.return_url(&self.order_id),
            order_note: self
                .order_note
                .unwrap_or_else(|| settings.order_note.clone()),
            order_id: self.order_id,
            order_amount: self.order_amount,
            order_currency: ORDER_CURRENCY.to_string(),
            customer: CustomerDetails {
                customer_id: self.customer_phone.clone(),
                customer_name: self.customer_name,
                customer_email,
                customer_phone: self.customer_phone,
            },
        }
    }
}

/// Customer block of a gateway order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// The gateway keys customers by phone number
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// A fully resolved order, ready for a gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: String,
    pub order_amount: Number,
    pub order_currency: String,
    pub customer: CustomerDetails,
    pub return_url: String,
    pub order_note: String,
}

/// Result of a successful order creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrderResult {
    pub order_id: String,
    pub payment_session_id: String,
    #[serde(default)]
    pub cf_order_id: Option<Value>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub order_amount: Option<Value>,
}

/// Current state of an order as reported by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrderStatus {
    pub order_id: Option<String>,
    pub order_status: Option<String>,
    /// Passed through untouched so `500` stays `500`
    pub order_amount: Option<Value>,
    pub cf_order_id: Option<Value>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_amount(value: &Value) -> Option<Number> {
    let amount = match value {
        Value::Number(n) => {
            let f = n.as_f64()?;
            return (f.is_finite() && f > 0.0).then(|| n.clone());
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    // Integral amounts go out as JSON integers.
    if amount.fract() == 0.0 && amount < 9_007_199_254_740_992.0 {
        Some(Number::from(amount as i64))
    } else {
        Number::from_f64(amount)
    }
}
