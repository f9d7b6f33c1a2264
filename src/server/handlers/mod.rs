//! HTTP handlers.

mod capture;
mod download;
mod records;

pub use capture::capture_handler;
pub use download::download_handler;
pub use records::list_records_handler;

use crate::error_handling::ApiError;

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}
