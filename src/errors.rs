use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::openweather::GatewayError;
use crate::services::params::ValidationError;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Gateway(err) => match err {
                GatewayError::InvalidUpstreamRequest(_) => StatusCode::BAD_REQUEST,
                GatewayError::InvalidApiKey => StatusCode::UNAUTHORIZED,
                GatewayError::LocationNotFound => StatusCode::NOT_FOUND,
                GatewayError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                GatewayError::UpstreamServiceError { .. }
                | GatewayError::UpstreamUnreachable(_)
                | GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Display never carries transport or decode details, those were
        // logged where the failure was classified.
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
