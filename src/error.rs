use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::translate::UpstreamError;

/// Body of every non-2xx proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("upstream rejected request: {0}")]
    UpstreamRejected(String),

    #[error("upstream authentication failed")]
    UpstreamAuth { status: StatusCode },

    #[error("upstream quota exceeded")]
    UpstreamQuotaExceeded,

    #[error("upstream timed out")]
    UpstreamTimeout,

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream failure: {0}")]
    UpstreamUnknown(String),
}

impl ApiError {
    /// Map a provider failure, using `auth_status` for credential problems.
    pub fn from_upstream(err: UpstreamError, auth_status: StatusCode) -> Self {
        match err {
            UpstreamError::Auth => ApiError::UpstreamAuth { status: auth_status },
            UpstreamError::QuotaExceeded => ApiError::UpstreamQuotaExceeded,
            UpstreamError::Rejected(message) => ApiError::UpstreamRejected(message),
            UpstreamError::Timeout => ApiError::UpstreamTimeout,
            UpstreamError::Unavailable(cause) => ApiError::UpstreamUnavailable(cause),
            other @ (UpstreamError::Status(_)
            | UpstreamError::EmptyResult
            | UpstreamError::Decode(_)) => ApiError::UpstreamUnknown(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UpstreamRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamAuth { status } => *status,
            ApiError::UpstreamQuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamUnknown(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Caller-facing message. Causes stay in the server log.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::UpstreamRejected(message) => format!("Invalid request: {}", message),
            ApiError::UpstreamAuth { .. } => {
                "Translation service authentication failed. Please check configuration.".to_string()
            }
            ApiError::UpstreamQuotaExceeded => {
                "Translation quota exceeded. Please try again later.".to_string()
            }
            ApiError::UpstreamTimeout => {
                "Request to the translation service timed out. Please try again.".to_string()
            }
            ApiError::UpstreamUnavailable(_) => {
                "Failed to connect to the translation service. Please try again.".to_string()
            }
            ApiError::UpstreamUnknown(_) => {
                "An unexpected error occurred during translation".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Translation failed ({}): {}", status, self);
        } else {
            warn!("Translation rejected ({}): {}", status, self);
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
