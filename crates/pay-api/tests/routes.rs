//! Router tests: full HTTP round trips against a fake gateway.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use axum_test::{TestResponse, TestServer};
use pay_api::{create_router, AppConfig, AppState, LogFormat};
use pay_core::{
    AdapterConfig, Credentials, GatewayAdapter, GatewayOrderResult, GatewayOrderStatus, NewOrder,
    PaymentError, PaymentGateway, PaymentResult,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Fake gateway: succeeds unless the order id starts with `bad`.
struct FakeCashfree;

#[async_trait]
impl PaymentGateway for FakeCashfree {
    async fn create_order(
        &self,
        _credentials: &Credentials,
        order: &NewOrder,
    ) -> PaymentResult<GatewayOrderResult> {
        if order.order_id.starts_with("bad") {
            return Err(PaymentError::Upstream {
                status: 400,
                message: Some("bad amount".to_string()),
            });
        }

        Ok(GatewayOrderResult {
            order_id: order.order_id.clone(),
            payment_session_id: format!("session_{}", order.order_id),
            cf_order_id: Some(json!("2149460581")),
            order_status: Some("ACTIVE".to_string()),
            order_amount: Some(Value::Number(order.order_amount.clone())),
        })
    }

    async fn get_order_status(
        &self,
        _credentials: &Credentials,
        order_id: &str,
    ) -> PaymentResult<GatewayOrderStatus> {
        if order_id.starts_with("bad") {
            return Err(PaymentError::Upstream {
                status: 404,
                message: Some("order not found".to_string()),
            });
        }

        Ok(GatewayOrderStatus {
            order_id: Some(order_id.to_string()),
            order_status: Some("PAID".to_string()),
            order_amount: Some(json!(500)),
            cf_order_id: Some(json!("CF1")),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake-cashfree"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_format: LogFormat::Pretty,
    }
}

fn server_with(config: AdapterConfig) -> TestServer {
    let adapter = GatewayAdapter::new(Arc::new(FakeCashfree), config);
    let state = AppState::with_adapter(adapter, test_config());
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(AdapterConfig::new(Credentials::new("TESTAPP123", "TESTSECRET")))
}

fn order_body(order_id: &str) -> Value {
    json!({
        "orderId": order_id,
        "orderAmount": 500,
        "customerName": "Ravi",
        "customerPhone": "9999988888"
    })
}

fn assert_cors(response: &TestResponse) {
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("access-control-allow-methods"),
        "POST, GET, OPTIONS"
    );
    assert_eq!(response.header("access-control-allow-headers"), "Content-Type");
}

#[tokio::test]
async fn options_returns_preflight_everywhere() {
    let server = server();

    for path in ["/", "/verify/O1", "/some/other/path"] {
        let response = server.method(Method::OPTIONS, path).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>(), json!({ "ok": true }));
        assert_cors(&response);
    }
}

#[tokio::test]
async fn get_returns_health() {
    let response = server().get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["status"], json!("healthy"));
    assert_cors(&response);
}

#[tokio::test]
async fn create_order_success() {
    let response = server().post("/").json(&order_body("O1")).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "paymentSessionId": "session_O1", "orderId": "O1" })
    );
    assert_cors(&response);
}

#[tokio::test]
async fn create_order_missing_field() {
    let mut body = order_body("O1");
    body.as_object_mut().unwrap().remove("customerPhone");

    let response = server().post("/").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));
    assert_cors(&response);
}

#[tokio::test]
async fn create_order_malformed_body() {
    let response = server().post("/").text("{orderId: O1").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Invalid request body. Expected JSON." })
    );
}

#[tokio::test]
async fn create_order_rejects_invalid_utf8() {
    let mut body = order_body("O1").to_string().into_bytes();
    let at = body
        .windows(4)
        .position(|w| w == b"Ravi")
        .unwrap();
    body[at + 2] = 0xff;

    let response = server().post("/").bytes(Bytes::from(body)).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Invalid request body. Expected JSON." })
    );
    assert_cors(&response);
}

#[tokio::test]
async fn create_order_upstream_error() {
    let response = server().post("/").json(&order_body("bad-1")).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "bad amount" })
    );
    assert_cors(&response);
}

#[tokio::test]
async fn create_order_without_credentials() {
    let response = server_with(AdapterConfig::default())
        .post("/")
        .json(&order_body("O1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn verify_order_success() {
    let response = server().post("/verify/O1").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "order_status": "PAID",
            "order_amount": 500,
            "cf_order_id": "CF1",
            "transactionId": "O1"
        })
    );
    assert_cors(&response);
}

#[tokio::test]
async fn verify_order_decodes_encoded_id() {
    let response = server().post("/verify/BB%2D7").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["transactionId"], json!("BB-7"));
}

#[tokio::test]
async fn verify_order_twice_is_stable() {
    let server = server();

    let first = server.post("/api/verify/O1/").await.json::<Value>();
    let second = server.post("/api/verify/O1/").await.json::<Value>();

    assert_eq!(first, second);
}

#[tokio::test]
async fn verify_order_upstream_error_is_generic() {
    let response = server().post("/verify/bad-9").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Payment verification failed" })
    );
}

#[tokio::test]
async fn verify_without_order_id() {
    let response = server().post("/verify").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
}

#[tokio::test]
async fn unmatched_method_is_invalid_route() {
    let response = server().method(Method::PUT, "/").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Invalid route" })
    );
    assert_cors(&response);
}
