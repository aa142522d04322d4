//! HTTP handlers

pub mod tasks;
pub mod users;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors a handler can surface to the client.
///
/// The only distinguished failure is "no row for the given identifier";
/// everything else collapses into a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Requested Data with id as {0} not Found")]
    NotFound(i64),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({
            "detail": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// Liveness probe, no storage access
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
