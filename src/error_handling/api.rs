//! API errors and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use super::types::StoreError;

/// Errors returned by the HTTP handlers.
///
/// The `Display` text of each variant is exactly what the client sees in the
/// `error` field of the JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required capture field was absent, empty or not a string.
    #[error("Missing data")]
    MissingData,

    /// A capture field would break the one-record-per-line file format.
    #[error("Invalid data")]
    InvalidData,

    #[error("Failed to read data")]
    ReadFailed(#[source] StoreError),

    #[error("Failed to save data")]
    SaveFailed(#[source] StoreError),

    #[error("Failed to download file")]
    DownloadFailed(#[source] StoreError),

    /// No route matched the request.
    #[error("API not found")]
    NotFound,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingData | ApiError::InvalidData => StatusCode::BAD_REQUEST,
            ApiError::ReadFailed(_) | ApiError::SaveFailed(_) | ApiError::DownloadFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_read() {
            ApiError::ReadFailed(err)
        } else {
            ApiError::SaveFailed(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::ReadFailed(cause)
            | ApiError::SaveFailed(cause)
            | ApiError::DownloadFailed(cause) => {
                log::error!("{}: {}", self, cause);
            }
            _ => log::debug!("Rejected request: {}", self),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
