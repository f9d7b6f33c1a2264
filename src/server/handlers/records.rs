//! Record listing handler.

use axum::{extract::State, Json};

use crate::error_handling::ApiError;
use crate::server::types::AppState;
use crate::storage::VisitorRecord;

/// Returns every stored record as JSON, oldest first.
pub async fn list_records_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitorRecord>>, ApiError> {
    let records = state.store.read_all().await.map_err(ApiError::ReadFailed)?;
    Ok(Json(records))
}
