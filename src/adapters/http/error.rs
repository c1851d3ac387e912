use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::schemas::FieldError;
use crate::domain::{ErrorClass, ValuationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),
    #[error("request body failed validation")]
    Validation {
        status: StatusCode,
        errors: Vec<FieldError>,
    },
}

/// Error body: a message for valuation failures, a list for shape failures.
#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    detail: T,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Valuation(e) => {
                let status = match e.class() {
                    ErrorClass::Caller => StatusCode::BAD_REQUEST,
                    ErrorClass::Upstream => StatusCode::BAD_GATEWAY,
                };
                if status.is_server_error() {
                    warn!(error = ?e, "Valuation failed upstream");
                } else {
                    debug!(error = %e, "Valuation rejected");
                }
                let body = Json(ErrorBody {
                    detail: e.to_string(),
                });
                (status, body).into_response()
            }
            ApiError::Validation { status, errors } => {
                debug!(errors = errors.len(), "Request body failed validation");
                (status, Json(ErrorBody { detail: errors })).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            errors,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Content-type and body-read failures keep axum's status.
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) | JsonRejection::BytesRejection(_) => {
                rejection.status()
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError::Validation {
            status,
            errors: vec![FieldError::new(&["body"], rejection.body_text(), "json_invalid")],
        }
    }
}
