use crate::core::errors::MetadataError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Metadata(#[from] MetadataError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Metadata(MetadataError::UnsupportedFormat { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Metadata(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Metadata(err) if err.is_remote() => {
                tracing::error!("Remote metadata call failed: {}", err)
            }
            _ if status.is_server_error() => tracing::error!("Request failed: {}", self),
            _ => tracing::debug!("Rejected request: {}", self),
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
