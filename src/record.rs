use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

use crate::codes;

/// Error information reported to clients of the API.
///
/// One record describes one failure. It is built at the point the failure
/// is detected, optionally tagged with the request ID once the transport
/// layer knows it, and then rendered once as a JSON response. The internal
/// fields (`status`, `cause`) never reach the wire; the serializer only
/// sees `code`, `message`, `request_id` and `meta`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Error code for programmatic handling. Always a single alphabet
    /// prefix and a 4-digit number (see [`crate::codes`]). Not validated;
    /// callers are trusted to follow the convention.
    code: String,

    /// User-friendly error message. MUST NOT contain internal error text
    /// or debug information, which is useless to clients and may leak
    /// server state.
    message: String,

    /// ID of the request which caused this error, for cross-referencing
    /// server logs. Stored as a string because the ID can exceed 2^53 and
    /// JavaScript clients would lose precision on it as a number.
    request_id: String,

    /// HTTP status code the transport layer should emit for this error.
    #[serde(skip)]
    status: StatusCode,

    /// The underlying internal failure, kept for logging only.
    #[serde(skip)]
    cause: Option<anyhow::Error>,

    /// Arbitrary per-error detail. What it means depends on each error;
    /// a validation error might carry per-field results, for instance.
    #[schema(value_type = Object)]
    meta: Map<String, Value>,
}

impl ApiError {
    /// Create a new error record.
    ///
    /// Never fails: no validation is performed on the code or message, and
    /// any status code is accepted. `meta` starts empty and `request_id`
    /// stays empty until [`ApiError::set_request_id`] is called.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
        cause: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: String::new(),
            status,
            cause,
            meta: Map::new(),
        }
    }

    /// Create an internal server error carrying `cause` for the logs.
    ///
    /// Clients always see the same generic code and message; the real
    /// cause stays server-side.
    pub fn internal_server_error(cause: impl Into<anyhow::Error>) -> Self {
        Self::new(
            codes::INTERNAL_SERVER_ERROR,
            codes::SOMETHING_WENT_WRONG,
            StatusCode::INTERNAL_SERVER_ERROR,
            Some(cause.into()),
        )
    }

    /// Create a "route not found" error.
    pub fn not_found() -> Self {
        Self::new(
            codes::REQUEST_URL_NOT_FOUND,
            "Page not found.",
            StatusCode::NOT_FOUND,
            None,
        )
    }

    /// Create an error for a failed read of the request body.
    pub fn body_read_error(cause: impl Into<anyhow::Error>) -> Self {
        Self::new(
            codes::REQUEST_BODY_READ,
            "Failed to read the request body.",
            StatusCode::BAD_REQUEST,
            Some(cause.into()),
        )
    }

    /// Create an error for a request body that could not be decoded.
    pub fn body_parse_error(cause: impl Into<anyhow::Error>) -> Self {
        Self::new(
            codes::REQUEST_BODY_PARSE,
            "Failed to parse the request body.",
            StatusCode::BAD_REQUEST,
            Some(cause.into()),
        )
    }

    /// Set the ID of the current request.
    ///
    /// Rendered as a decimal string so clients keep the exact value even
    /// when it does not fit in an IEEE-754 double.
    pub fn set_request_id(&mut self, id: u64) {
        self.request_id = id.to_string();
    }

    /// Attach one meta entry, builder-style.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Attach one meta entry in place.
    pub fn insert_meta(&mut self, key: impl Into<String>, value: Value) {
        self.meta.insert(key.into(), value);
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_new_initializes_meta_and_request_id() {
        let err = ApiError::new("J0001", "Page not found.", StatusCode::NOT_FOUND, None);
        assert_eq!(err.code(), "J0001");
        assert_eq!(err.message(), "Page not found.");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.request_id(), "");
        assert!(err.meta().is_empty());
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_internal_server_error_fixed_triple() {
        let err = ApiError::internal_server_error(anyhow!("db timeout"));
        assert_eq!(err.code(), codes::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), codes::SOMETHING_WENT_WRONG);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_set_request_id_renders_decimal_string() {
        let mut err = ApiError::not_found();
        err.set_request_id(42);
        assert_eq!(err.request_id(), "42");
    }

    #[test]
    fn test_set_request_id_keeps_precision_beyond_f64() {
        // u64::MAX cannot be represented exactly as an IEEE-754 double.
        let mut err = ApiError::not_found();
        err.set_request_id(u64::MAX);
        assert_eq!(err.request_id(), "18446744073709551615");
    }

    #[test]
    fn test_meta_maps_are_independent() {
        let mut a = ApiError::not_found();
        let b = ApiError::not_found();
        a.insert_meta("field", serde_json::json!("name"));
        assert_eq!(a.meta().len(), 1);
        assert!(b.meta().is_empty());
    }

    #[test]
    fn test_with_meta_builder() {
        let err = ApiError::body_parse_error(anyhow!("unexpected token"))
            .with_meta("line", serde_json::json!(3))
            .with_meta("column", serde_json::json!(17));
        assert_eq!(err.meta()["line"], serde_json::json!(3));
        assert_eq!(err.meta()["column"], serde_json::json!(17));
    }

    #[test]
    fn test_display_and_source() {
        let err = ApiError::internal_server_error(anyhow!("db timeout"));
        assert_eq!(
            err.to_string(),
            "[J0002] Something went wrong. Please try again later."
        );
        let source = std::error::Error::source(&err).expect("source retained");
        assert_eq!(source.to_string(), "db timeout");
    }

    #[test]
    fn test_well_known_constructors() {
        let err = ApiError::not_found();
        assert_eq!(err.code(), codes::REQUEST_URL_NOT_FOUND);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::body_read_error(anyhow!("connection reset"));
        assert_eq!(err.code(), codes::REQUEST_BODY_READ);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::body_parse_error(anyhow!("invalid json"));
        assert_eq!(err.code(), codes::REQUEST_BODY_PARSE);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
