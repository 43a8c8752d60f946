/**
 * Error Conversion
 *
 * Implements `IntoResponse` for `ApiError` so handlers can return typed
 * failures directly. The response body is JSON:
 *
 * ```json
 * {
 *   "error": "folder not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {self}");
        } else {
            tracing::debug!("request failed: {self}");
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
