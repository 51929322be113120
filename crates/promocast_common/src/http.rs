// --- File: crates/promocast_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, PromocastError};

// Include the client module
pub mod client;

/// Errors render as `{"error": {"message", "code"}}` with the mapped status.
impl IntoResponse for PromocastError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::validation_error;

    #[test]
    fn test_validation_error_maps_to_unprocessable_entity() {
        let response = validation_error("missing field: title").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
