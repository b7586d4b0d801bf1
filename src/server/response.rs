//! Error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marketscope_search::SearchError;
use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Failure envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// The error details.
    pub error: ErrorBody,
}

/// Error details within an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code, e.g. `"INVALID_QUERY"`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Whether the same request may succeed if retried.
    pub retryable: bool,
}

/// A [`MarketError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(MarketError);

impl<E> From<E> for ApiError
where
    E: Into<MarketError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MarketError::Search(SearchError::InvalidQuery(_) | SearchError::UnsupportedMode(_)) => {
                StatusCode::BAD_REQUEST
            }
            MarketError::Request(_) => StatusCode::BAD_REQUEST,
            MarketError::Search(SearchError::Provider(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, code = self.0.code(), error = %self.0, "request failed");
        } else {
            tracing::debug!(%status, code = self.0.code(), error = %self.0, "request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorBody {
                code: self.0.code().to_owned(),
                message: self.0.to_string(),
                retryable: self.0.is_retryable(),
            },
        };
        (status, Json(body)).into_response()
    }
}
