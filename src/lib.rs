//! Structured error handling for API responses.
//!
//! Every failure reported to a client of the Janus API is an [`ApiError`]:
//! a stable machine-readable code, a user-safe message, a request ID for
//! log correlation, and free-form per-error meta. The HTTP status and the
//! internal cause travel with the record for the transport layer and the
//! logs, but are never serialized to clients.

pub mod codes;
pub mod record;
pub mod response;

pub use record::ApiError;
