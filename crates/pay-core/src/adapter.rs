//! # Gateway Adapter
//!
//! Takes one inbound request, routes it, validates it, calls the gateway and
//! folds every outcome into a [`ResponseEnvelope`]. Errors never escape
//! [`GatewayAdapter::handle`].

use crate::config::AdapterConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::{PaymentError, PaymentResult};
use crate::gateway::BoxedPaymentGateway;
use crate::order::{OrderRequest, INVALID_BODY_MESSAGE};
use crate::route::{verify_order_id, Route};
use serde_json::Value;
use tracing::{error, info, instrument, warn, Span};

/// Service name reported by the health route
pub const SERVICE_NAME: &str = "buffbuddies-pay";

const CREATE_FAILED_MESSAGE: &str = "Failed to create payment order";
const VERIFY_FAILED_MESSAGE: &str = "Payment verification failed";

/// Body of an inbound request, as the host hands it over
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Unparsed text
    Raw(String),
    /// Undecoded bytes straight off the wire
    Bytes(Vec<u8>),
    /// Already parsed by the host
    Json(Value),
}

impl RequestBody {
    /// Parse as JSON. An empty body reads as `{}`.
    pub fn parse_json(&self) -> PaymentResult<Value> {
        match self {
            RequestBody::Empty => Ok(Value::Object(Default::default())),
            RequestBody::Raw(text) if text.trim().is_empty() => {
                Ok(Value::Object(Default::default()))
            }
            RequestBody::Raw(text) => serde_json::from_str(text)
                .map_err(|_| PaymentError::Validation(INVALID_BODY_MESSAGE.to_string())),
            RequestBody::Bytes(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {
                Ok(Value::Object(Default::default()))
            }
            RequestBody::Bytes(bytes) => serde_json::from_slice(bytes)
                .map_err(|_| PaymentError::Validation(INVALID_BODY_MESSAGE.to_string())),
            RequestBody::Json(value) => Ok(value.clone()),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Bytes(bytes)
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        if text.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Raw(text)
        }
    }
}

/// Method, path and body of one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    pub method: String,
    pub path: String,
    pub body: RequestBody,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    pub fn route(&self) -> Route {
        Route::classify(&self.method, &self.path)
    }
}

/// The request router and translator in front of a [`PaymentGateway`].
///
/// Stateless apart from read-only configuration, so one instance is shared
/// across all requests.
///
/// [`PaymentGateway`]: crate::gateway::PaymentGateway
pub struct GatewayAdapter {
    gateway: BoxedPaymentGateway,
    config: AdapterConfig,
}

impl GatewayAdapter {
    pub fn new(gateway: BoxedPaymentGateway, config: AdapterConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.gateway.provider_name()
    }

    /// Handle one request. Always produces exactly one envelope.
    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = %request.path, route = tracing::field::Empty)
    )]
    pub async fn handle(&self, request: &InboundRequest) -> ResponseEnvelope {
        let route = request.route();
        Span::current().record("route", route.as_str());

        let result = match route {
            Route::Preflight => Ok(ResponseEnvelope::preflight()),
            Route::Health => Ok(ResponseEnvelope::health(
                SERVICE_NAME,
                env!("CARGO_PKG_VERSION"),
            )),
            Route::CreateOrder => self.create_order(&request.body).await,
            Route::VerifyOrder => self.verify_order(&request.path, &request.body).await,
            Route::NotFound => Err(PaymentError::RouteNotFound {
                method: request.method.clone(),
                path: request.path.clone(),
            }),
        };

        result.unwrap_or_else(|err| {
            if err.status_code() >= 500 {
                error!(retryable = err.is_retryable(), "Request failed: {}", err);
            } else {
                warn!("Request rejected: {}", err);
            }
            ResponseEnvelope::from_error(&err)
        })
    }

    async fn create_order(&self, body: &RequestBody) -> PaymentResult<ResponseEnvelope> {
        let body = body.parse_json()?;
        let credentials = self.config.resolve_credentials(Some(&body))?;
        let order = OrderRequest::from_json(&body)?.into_new_order(&self.config.order);

        info!(
            order_id = %order.order_id,
            amount = %order.order_amount,
            app_id = credentials.app_id_prefix(),
            provider = self.provider_name(),
            "Creating payment order"
        );

        let result = self
            .gateway
            .create_order(&credentials, &order)
            .await
            .map_err(|err| match err {
                PaymentError::Upstream {
                    status,
                    message: None,
                } => PaymentError::Upstream {
                    status,
                    message: Some(CREATE_FAILED_MESSAGE.to_string()),
                },
                other => other,
            })?;

        info!(
            order_id = %result.order_id,
            order_status = result.order_status.as_deref().unwrap_or("unknown"),
            "Created payment order"
        );

        Ok(ResponseEnvelope::order_created(&result))
    }

    async fn verify_order(&self, path: &str, body: &RequestBody) -> PaymentResult<ResponseEnvelope> {
        let order_id = verify_order_id(path)
            .ok_or_else(|| PaymentError::Validation("Order ID is required".to_string()))?;

        // Only the legacy credential fallback looks at the body here.
        let parsed = body.parse_json().ok();
        let credentials = self.config.resolve_credentials(parsed.as_ref())?;

        info!(
            order_id = %order_id,
            app_id = credentials.app_id_prefix(),
            provider = self.provider_name(),
            "Verifying payment order"
        );

        // The gateway's error body is never passed through on this route.
        let status = self
            .gateway
            .get_order_status(&credentials, &order_id)
            .await
            .map_err(|err| match err {
                PaymentError::Upstream { status, .. } => PaymentError::Upstream {
                    status,
                    message: Some(VERIFY_FAILED_MESSAGE.to_string()),
                },
                other => other,
            })?;

        info!(
            order_id = %order_id,
            order_status = status.order_status.as_deref().unwrap_or("unknown"),
            "Verified payment order"
        );

        Ok(ResponseEnvelope::order_verified(&status))
    }
}
