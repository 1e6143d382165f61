//! API error responses.
//!
//! Every failure surfaces to callers as `{"ok": false, "error": <message>}`
//! with an appropriate status code. Transport diagnostics stay in the logs;
//! the messages here are short, fixed and German like the rest of the site.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Fixed message for submissions with missing required fields.
pub const MSG_MISSING_FIELDS: &str = "Pflichtfelder fehlen.";
/// Fixed message for configuration and delivery failures.
pub const MSG_SERVER_ERROR: &str = "Serverfehler";
/// Message for request bodies that could not be decoded at all.
pub const MSG_INVALID_BODY: &str = "Ungültige Anfrage.";
/// Message for rate-limited clients.
pub const MSG_RATE_LIMITED: &str = "Zu viele Anfragen. Bitte später erneut versuchen.";

/// Error body serialized to callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always false.
    pub ok: bool,
    /// Short human-readable message.
    pub error: String,
}

/// API error: status code plus the user-facing message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the fixed missing-fields message.
    pub fn missing_fields() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_MISSING_FIELDS)
    }

    /// 400 for undecodable request bodies.
    pub fn invalid_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_BODY)
    }

    /// 500 with the generic server-error message.
    pub fn server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR)
    }

    /// 429 for clients over the rate limit.
    pub fn rate_limited() -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED)
    }

    /// The HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            ok: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(ApiError::missing_fields().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::missing_fields().message(), MSG_MISSING_FIELDS);

        assert_eq!(ApiError::invalid_body().status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ApiError::server_error().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::server_error().message(), MSG_SERVER_ERROR);

        assert_eq!(
            ApiError::rate_limited().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            ok: false,
            error: MSG_MISSING_FIELDS.to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Pflichtfelder fehlen.");
    }
}
