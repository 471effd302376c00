//! Uniform error body for every endpoint
//!
//! Whatever goes wrong, the client sees `{"success": false, "error": ...}`
//! with optional `details` / `raw` for upstream diagnostics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::advisory::AdvisoryError;
use crate::predictor::PredictError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                success: false,
                error: message.into(),
                details: None,
                raw: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn with_details(mut self, details: String) -> Self {
        self.body.details = Some(details);
        self
    }

    fn with_raw(mut self, raw: String) -> Self {
        self.body.raw = Some(raw);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, error = %self.body.error, "request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.body.error, "request rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        let status = match &e {
            PredictError::MissingFields(_)
            | PredictError::AreaNotFound { .. }
            | PredictError::ItemNotFound { .. }
            | PredictError::InvalidNumber { .. } => StatusCode::BAD_REQUEST,
            PredictError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<AdvisoryError> for ApiError {
    fn from(e: AdvisoryError) -> Self {
        let message = e.to_string();
        match e {
            AdvisoryError::MissingCrop => ApiError::bad_request(message),
            AdvisoryError::MissingCredential => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, message)
            }
            AdvisoryError::UpstreamStatus { body, .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, message).with_details(body)
            }
            AdvisoryError::Unparsable { raw } => {
                ApiError::new(StatusCode::BAD_GATEWAY, message).with_raw(raw)
            }
            AdvisoryError::MalformedEnvelope(_) | AdvisoryError::Transport(_) => {
                ApiError::new(StatusCode::BAD_GATEWAY, message)
            }
            AdvisoryError::Timeout => ApiError::new(StatusCode::GATEWAY_TIMEOUT, message),
        }
    }
}
