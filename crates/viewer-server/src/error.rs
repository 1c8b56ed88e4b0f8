//! HTTP error responses.
//!
//! The interception layer answers misses and storage faults with plain-text
//! bodies; a broken load simply renders in the navigating surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use html_viewer_core::Error;

/// An error rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with a status and body text.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 with the default body.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }

    /// 500 with a description of the fault.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::not_found(),
            Error::InvalidArgument(message) => Self::new(StatusCode::BAD_REQUEST, message),
            Error::Capability { .. } => Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}
