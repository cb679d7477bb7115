//! API error handling
//!
//! Every failure leaves the API as `{"error": <kind>, "detail": <text>}`.
//! Store failures other than a missing breed are logged here and replaced by
//! a generic message, so driver text never reaches a client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use core_kernel::PortError;
use domain_cattery::CatteryError;

/// Detail returned for any failure the client cannot act on
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected error occurred.";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, detail) = match self {
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Validation(msg) => ("validation_error", msg),
            ApiError::Internal(msg) => ("internal_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatteryError> for ApiError {
    fn from(err: CatteryError) -> Self {
        match err {
            e @ CatteryError::KittenNotFound(_) => ApiError::NotFound(e.to_string()),
            CatteryError::Store(PortError::ForeignKeyViolation { detail, .. }) => {
                ApiError::BadRequest(detail)
            }
            CatteryError::Store(other) => {
                error!(error = %other, "Unhandled store error");
                ApiError::Internal(INTERNAL_ERROR_DETAIL.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape
            JsonRejection::JsonDataError(e) => ApiError::Validation(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // e.g. `/kittens/abc` or an id beyond i32
            PathRejection::FailedToDeserializePathParams(e) => ApiError::Validation(e.body_text()),
            other => {
                error!(error = %other, "Route is missing its path parameters");
                ApiError::Internal(INTERNAL_ERROR_DETAIL.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}
