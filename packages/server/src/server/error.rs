//! Transport-level error mapping.
//!
//! Service layers return typed failures; this module converts them to
//! HTTP responses at the router boundary. Every non-2xx response uses
//! the same body shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::domains::auth::AuthError;
use crate::domains::member::MemberError;

/// Error body returned for every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// An HTTP-mappable error with the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
    pub path: String,
    pub errors: Option<Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: String, path: &str) -> Self {
        Self {
            status,
            error,
            message,
            path: path.to_string(),
            errors: None,
        }
    }

    pub fn bad_request(message: String, path: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", message, path)
    }

    pub fn unauthorized(path: &str) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Full authentication is required to access this resource".to_string(),
            path,
        )
    }

    pub fn forbidden(path: &str) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "Access denied: insufficient role".to_string(),
            path,
        )
    }

    /// 400 with per-field messages.
    pub fn validation(messages: Vec<String>, path: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Validation Failed",
            message: "Invalid input data".to_string(),
            path: path.to_string(),
            errors: Some(messages),
        }
    }

    /// 500 with a generic message; the cause goes to the log, not the
    /// response.
    pub fn internal(path: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "An unexpected error occurred".to_string(),
            path,
        )
    }

    pub fn from_auth(err: AuthError, path: &str) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                err.to_string(),
                path,
            ),
            AuthError::Internal(source) => {
                error!("Internal error during authentication: {:#}", source);
                Self::internal(path)
            }
        }
    }

    pub fn from_member(err: MemberError, path: &str) -> Self {
        match err {
            MemberError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", err.to_string(), path)
            }
            MemberError::DuplicateEmail(_) => Self::bad_request(err.to_string(), path),
            MemberError::Internal(source) => {
                error!("Internal error during member operation: {:#}", source);
                Self::internal(path)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self.error.to_string(),
            message: self.message,
            path: self.path,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}
