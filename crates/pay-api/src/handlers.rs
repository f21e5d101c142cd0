//! # Request Handlers
//!
//! One catch-all handler: every method on every path is handed to the
//! gateway adapter, which owns routing. The envelope it returns is rendered
//! with its status code and the CORS header set.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{InboundRequest, ResponseEnvelope, CORS_HEADERS};
use tracing::instrument;
use uuid::Uuid;

/// Axum rendering of a [`ResponseEnvelope`]
#[derive(Debug)]
pub struct ApiResponse(pub ResponseEnvelope);

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let ResponseEnvelope { status, body } = self.0;
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, CORS_HEADERS, Json(body)).into_response()
    }
}

impl From<ResponseEnvelope> for ApiResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self(envelope)
    }
}

/// Route any request through the adapter
#[instrument(skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> ApiResponse {
    let request = InboundRequest::new(method.as_str(), uri.path()).with_body(body.to_vec());

    let envelope = state.adapter.handle(&request).await;

    tracing::debug!(status = envelope.status, "Responding");

    ApiResponse(envelope)
}
