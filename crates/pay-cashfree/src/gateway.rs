//! # Cashfree Orders API
//!
//! `POST /pg/orders` to create an order and obtain a payment session,
//! `GET /pg/orders/{order_id}` to read its status.

use crate::config::CashfreeConfig;
use async_trait::async_trait;
use pay_core::{
    Credentials, GatewayOrderResult, GatewayOrderStatus, NewOrder, PaymentError, PaymentGateway,
    PaymentResult,
};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, error, info, instrument};

pub(crate) mod headers {
    pub(crate) const X_CLIENT_ID: &str = "x-client-id";
    pub(crate) const X_CLIENT_SECRET: &str = "x-client-secret";
    pub(crate) const X_API_VERSION: &str = "x-api-version";
}

/// Cashfree PG gateway
///
/// Holds one pooled HTTP client; credentials arrive with each call.
pub struct CashfreeGateway {
    config: CashfreeConfig,
    client: Client,
}

impl CashfreeGateway {
    /// Create a new Cashfree gateway
    pub fn new(config: CashfreeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = CashfreeConfig::from_env()?;
        Self::new(config)
    }

    /// Attach auth and version headers
    fn authorize(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request
            .header(headers::X_CLIENT_ID, &credentials.app_id)
            .header(headers::X_CLIENT_SECRET, &credentials.secret_key)
            .header(headers::X_API_VERSION, &self.config.api_version)
    }

    /// `{base}/pg/orders/{order_id}` with the id encoded as one path segment
    fn order_url(&self, order_id: &str) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.config.orders_url()).map_err(|e| {
            PaymentError::Configuration(format!("Invalid Cashfree base URL: {}", e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration("Cashfree base URL cannot carry a path".to_string())
            })?
            .push(order_id);

        Ok(url)
    }

    /// Send a request and read the whole body.
    async fn send(&self, request: RequestBuilder) -> PaymentResult<(StatusCode, String)> {
        let response = request.send().await.map_err(network_error)?;

        let status = response.status();
        let body = response.text().await.map_err(network_error)?;

        Ok((status, body))
    }
}

#[async_trait]
impl PaymentGateway for CashfreeGateway {
    #[instrument(skip(self, credentials, order), fields(order_id = %order.order_id))]
    async fn create_order(
        &self,
        credentials: &Credentials,
        order: &NewOrder,
    ) -> PaymentResult<GatewayOrderResult> {
        let payload = CashfreeOrderRequest::from(order);

        debug!(
            "Creating Cashfree order: amount={} {}",
            payload.order_amount, payload.order_currency
        );

        let request = self
            .authorize(self.client.post(self.config.orders_url()), credentials)
            .json(&payload);

        let (status, body) = self.send(request).await?;

        if !status.is_success() {
            error!("Cashfree API error: status={}, body={}", status, body);
            return Err(upstream_error(status, &body));
        }

        let response: CashfreeOrderResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Cashfree order: {}", e))
        })?;

        info!(
            "Created Cashfree order: order_id={}, status={}",
            response.order_id,
            response.order_status.as_deref().unwrap_or("unknown")
        );

        Ok(GatewayOrderResult {
            order_id: response.order_id,
            payment_session_id: response.payment_session_id,
            cf_order_id: response.cf_order_id,
            order_status: response.order_status,
            order_amount: response.order_amount,
        })
    }

    #[instrument(skip(self, credentials))]
    async fn get_order_status(
        &self,
        credentials: &Credentials,
        order_id: &str,
    ) -> PaymentResult<GatewayOrderStatus> {
        let url = self.order_url(order_id)?;
        let request = self.authorize(self.client.get(url), credentials);

        let (status, body) = self.send(request).await?;

        if !status.is_success() {
            error!("Cashfree API error: status={}, body={}", status, body);
            return Err(upstream_error(status, &body));
        }

        let response: CashfreeOrderStatusResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Cashfree order status: {}", e))
        })?;

        debug!(
            "Fetched Cashfree order: status={}",
            response.order_status.as_deref().unwrap_or("unknown")
        );

        Ok(GatewayOrderStatus {
            order_id: response.order_id,
            order_status: response.order_status,
            order_amount: response.order_amount,
            cf_order_id: response.cf_order_id,
        })
    }

    fn provider_name(&self) -> &'static str {
        "cashfree"
    }
}

fn network_error(e: reqwest::Error) -> PaymentError {
    if e.is_timeout() {
        PaymentError::Network(format!("Cashfree request timed out: {}", e))
    } else {
        PaymentError::Network(e.to_string())
    }
}

fn upstream_error(status: StatusCode, body: &str) -> PaymentError {
    let message = serde_json::from_str::<CashfreeErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty());

    PaymentError::Upstream {
        status: status.as_u16(),
        message,
    }
}

// =============================================================================
// Cashfree API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct CashfreeOrderRequest<'a> {
    order_id: &'a str,
    order_amount: &'a Number,
    order_currency: &'a str,
    customer_details: CashfreeCustomerDetails<'a>,
    order_meta: CashfreeOrderMeta<'a>,
    order_note: &'a str,
}

#[derive(Debug, Serialize)]
struct CashfreeCustomerDetails<'a> {
    customer_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
}

#[derive(Debug, Serialize)]
struct CashfreeOrderMeta<'a> {
    return_url: &'a str,
}

impl<'a> From<&'a NewOrder> for CashfreeOrderRequest<'a> {
    fn from(order: &'a NewOrder) -> Self {
        Self {
            order_id: &order.order_id,
            order_amount: &order.order_amount,
            order_currency: &order.order_currency,
            customer_details: CashfreeCustomerDetails {
                customer_id: &order.customer.customer_id,
                customer_name: &order.customer.customer_name,
                customer_email: &order.customer.customer_email,
                customer_phone: &order.customer.customer_phone,
            },
            order_meta: CashfreeOrderMeta {
                return_url: &order.return_url,
            },
            order_note: &order.order_note,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CashfreeOrderResponse {
    order_id: String,
    payment_session_id: String,
    #[serde(default)]
    cf_order_id: Option<Value>,
    #[serde(default)]
    order_status: Option<String>,
    #[serde(default)]
    order_amount: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CashfreeOrderStatusResponse {
    #[serde(default)]
    order_id: Option<String>,
    #[serde(default)]
    order_status: Option<String>,
    #[serde(default)]
    order_amount: Option<Value>,
    #[serde(default)]
    cf_order_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CashfreeErrorResponse {
    #[serde(default)]
    message: Option<String>,
}
