//! Visitor capture handler.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error_handling::ApiError;
use crate::server::types::{AppState, CapturePayload, CaptureResponse};
use crate::storage::AppendOutcome;

/// Records a visit unless the IP was already seen on the same day.
///
/// A body that is not valid JSON, or has non-string fields, counts as missing
/// data. Both outcomes of the duplicate check report success; only the
/// message differs.
pub async fn capture_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapturePayload>, JsonRejection>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        log::debug!("Unreadable capture payload: {}", rejection);
        ApiError::MissingData
    })?;
    let record = payload.into_record()?;

    match state.store.append_if_absent(&record).await? {
        AppendOutcome::Inserted => {
            log::debug!("Captured visit from {} on {}", record.ip, record.date_key());
            Ok(Json(CaptureResponse::inserted()))
        }
        AppendOutcome::AlreadyExists => {
            log::debug!(
                "Visit from {} on {} already logged",
                record.ip,
                record.date_key()
            );
            Ok(Json(CaptureResponse::already_exists()))
        }
    }
}
