use axum::{
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::record::ApiError;

/// Renders the record as the API's error response: the internal status
/// picks the HTTP status line, the body is the four-field JSON payload.
/// The retained cause is logged here, right before it goes out of scope,
/// so operators can cross-reference the client-visible `request_id` with
/// the real failure.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(
                request_id = %self.request_id(),
                code = %self.code(),
                status = %status.as_u16(),
                cause = ?self.cause(),
                "Request failed"
            );
        } else {
            warn!(
                request_id = %self.request_id(),
                code = %self.code(),
                status = %status.as_u16(),
                cause = ?self.cause(),
                "Request rejected"
            );
        }

        (status, Json(self)).into_response()
    }
}
