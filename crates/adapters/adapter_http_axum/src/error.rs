//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pinhub_domain::error::PinHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PinHubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(PinHubError);

impl From<PinHubError> for ApiError {
    fn from(err: PinHubError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code this error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PinHubError::StaleEvent(_) | PinHubError::Busy(_) => StatusCode::CONFLICT,
            PinHubError::NotFound(_) => StatusCode::NOT_FOUND,
            PinHubError::InvalidRange(_) | PinHubError::Validation(_) => StatusCode::BAD_REQUEST,
            PinHubError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            PinHubError::StaleEvent(err) => err.to_string(),
            PinHubError::NotFound(err) => err.to_string(),
            PinHubError::Busy(err) => err.to_string(),
            PinHubError::InvalidRange(err) => err.to_string(),
            PinHubError::Validation(err) => err.to_string(),
            PinHubError::Unavailable(err) => {
                tracing::warn!(error = %err, "actuator unavailable");
                err.to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
