//! Reserved error codes shared by every Janus API service.
//!
//! Codes follow the convention of a single alphabet prefix followed by a
//! 4-digit number (e.g. `J0001`). The convention is documentation, not
//! something the constructors enforce; clients pattern-match on these
//! values, so they must never change once published.

/// Requested URL/route does not exist.
pub const REQUEST_URL_NOT_FOUND: &str = "J0001";

/// Generic internal server error. Always paired with [`SOMETHING_WENT_WRONG`]
/// so an unexpected fault never leaks internal detail to clients.
pub const INTERNAL_SERVER_ERROR: &str = "J0002";

/// Transport-level failure while reading the request body.
pub const REQUEST_BODY_READ: &str = "J0003";

/// The request body was read but could not be decoded.
pub const REQUEST_BODY_PARSE: &str = "J0004";

/// Error message that doesn't explain anything to users except that
/// something went wrong. Used whenever the real cause must stay private.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again later.";
