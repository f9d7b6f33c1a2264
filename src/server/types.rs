//! Server state and wire types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error_handling::ApiError;
use crate::storage::{RecordStore, VisitorRecord};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

/// JSON body of `POST /capture`.
///
/// Every field is optional at the wire level so that an absent field is
/// reported as missing data rather than as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePayload {
    pub ip: Option<String>,
    pub region: Option<String>,
    pub date_time: Option<String>,
    pub long_lat: Option<String>,
}

impl CapturePayload {
    /// Turns the payload into a record, requiring all four fields to be
    /// present and non-empty and the result to fit on one CSV line.
    pub fn into_record(self) -> Result<VisitorRecord, ApiError> {
        fn required(field: Option<String>) -> Result<String, ApiError> {
            field
                .filter(|value| !value.is_empty())
                .ok_or(ApiError::MissingData)
        }

        let record = VisitorRecord {
            ip: required(self.ip)?,
            region: required(self.region)?,
            date_time: required(self.date_time)?,
            long_lat: required(self.long_lat)?,
        };

        if !record.is_storable() {
            return Err(ApiError::InvalidData);
        }
        Ok(record)
    }
}

/// JSON response for a successful `POST /capture`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CaptureResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Message returned when the IP was already logged for the day.
pub const ALREADY_EXISTS_MESSAGE: &str = "Data already exists for today";

impl CaptureResponse {
    pub fn inserted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn already_exists() -> Self {
        Self {
            success: true,
            message: Some(ALREADY_EXISTS_MESSAGE),
        }
    }
}
