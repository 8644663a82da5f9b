use crate::query::QueryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

/// A failed request, carrying the status code it maps to.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Query task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Query(QueryError::EmptyDataset) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Query(QueryError::InvalidDateFormat { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::Store(_)) | ApiError::TaskJoin(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Rejected request with {}: {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
