//! # pay-wasm
//!
//! WebAssembly bindings for buffbuddies-pay.
//!
//! Exposes the synchronous half of the gateway adapter to an edge or
//! serverless JavaScript host, so it can route and reject requests before
//! spending a gateway call:
//! - Route classification
//! - Order-id extraction for verify paths
//! - Create-order validation
//! - The CORS header set every response must carry
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { classify_route, validate_order_request, cors_headers } from 'buffbuddies-pay-wasm';
//!
//! await init();
//!
//! if (classify_route(req.method, req.path) === 'create_order') {
//!   const order = validate_order_request(req.bodyRaw); // throws on invalid input
//!   console.log('Order', order.orderId, order.orderAmount);
//! }
//!
//! return res.json(payload, 200, cors_headers());
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use pay_core::{OrderRequest, PaymentError, Route, CORS_HEADERS};
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

/// Classify a request into a route name:
/// `preflight`, `health`, `create_order`, `verify_order` or `not_found`.
#[wasm_bindgen]
pub fn classify_route(method: &str, path: &str) -> String {
    Route::classify(method, path).as_str().to_string()
}

/// Order id of a verify path, or `undefined`
#[wasm_bindgen]
pub fn verify_order_id(path: &str) -> Option<String> {
    pay_core::verify_order_id(path).map(|id| id.into_owned())
}

/// Validate a raw create-order body.
///
/// Returns the normalized order (`orderId`, `orderAmount`, ...) or throws an
/// `Error` whose message is the one the adapter would put in its envelope.
#[wasm_bindgen]
pub fn validate_order_request(body: &str) -> Result<JsValue, JsValue> {
    let order = validate_order_json(body).map_err(|e| JsValue::from(js_sys::Error::new(&e)))?;

    serde_wasm_bindgen::to_value(&order).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The fixed CORS headers as a plain object
#[wasm_bindgen]
pub fn cors_headers() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&cors_header_map()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn validate_order_json(body: &str) -> Result<OrderRequest, String> {
    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(body)
            .map_err(|_| pay_core::order::INVALID_BODY_MESSAGE.to_string())?
    };

    OrderRequest::from_json(&value).map_err(|e: PaymentError| e.public_message())
}

fn cors_header_map() -> BTreeMap<&'static str, &'static str> {
    CORS_HEADERS.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_route() {
        assert_eq!(classify_route("OPTIONS", "/x"), "preflight");
        assert_eq!(classify_route("POST", "/verify/O1"), "verify_order");
        assert_eq!(classify_route("POST", "/"), "create_order");
        assert_eq!(classify_route("PATCH", "/"), "not_found");
    }

    #[test]
    fn test_verify_order_id() {
        assert_eq!(verify_order_id("/verify/O1/").as_deref(), Some("O1"));
        assert_eq!(verify_order_id("/verify/BB%2D7").as_deref(), Some("BB-7"));
        assert_eq!(verify_order_id("/verify"), None);
    }

    #[test]
    fn test_validate_order_json() {
        let order = validate_order_json(
            r#"{"orderId":"O1","orderAmount":"250","customerName":"Ravi","customerPhone":"9999988888"}"#,
        )
        .unwrap();
        assert_eq!(order.order_amount.as_i64(), Some(250));

        assert_eq!(
            validate_order_json("{oops").unwrap_err(),
            "Invalid request body. Expected JSON."
        );
        assert!(validate_order_json("")
            .unwrap_err()
            .starts_with("Missing required fields"));
    }

    #[test]
    fn test_cors_header_map() {
        let headers = cors_header_map();
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(headers.len(), 3);
    }
}
