//! Raw CSV export handler.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::DOWNLOAD_FILE_NAME;
use crate::error_handling::ApiError;
use crate::server::types::AppState;

/// Sends the visitor log, header included, as an `index.csv` attachment.
pub async fn download_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = state
        .store
        .read_raw()
        .await
        .map_err(ApiError::DownloadFailed)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        bytes,
    )
        .into_response())
}
