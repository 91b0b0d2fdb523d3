//! HTTP error mapping
//!
//! [`ApiError`] is the only place layer outcomes become response codes. Every
//! failure body is a single-field JSON object; store failures collapse to a
//! generic 500 with the detail kept in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::core::error::Error;

/// An HTTP-mapped failure: a status code plus the message sent to the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with a caller-facing message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 with a caller-facing message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// 500 with a generic message; internals stay server-side
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal error".to_string(),
        }
    }

    /// The response status
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The caller-facing message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(message) => ApiError::bad_request(message),
            Error::NotFound(message) => ApiError::not_found(message),
            other => {
                tracing::error!(error = %other, "store operation failed");
                ApiError::internal()
            }
        }
    }
}
