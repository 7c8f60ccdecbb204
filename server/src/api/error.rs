use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad submission payload. Nothing is persisted, nothing is retried.
    #[error("{0}")]
    Validation(String),
    /// A get/put/delete/list call against the backing store failed. The
    /// in-flight reconcile is abandoned; a later pass self-heals.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Store(err) => {
                error!("store error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
