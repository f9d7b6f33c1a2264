//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources before the
//! HTTP listener starts:
//! - Logger
//! - Record store (visitor log file bootstrap)

mod logger;

use std::sync::Arc;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::storage::RecordStore;

// Re-export public API
pub use logger::init_logger_with;

/// Opens the visitor log named in `config`, creating it (header only) if absent.
///
/// # Errors
///
/// Returns `InitializationError::StoreError` if the directory or file cannot be created.
pub async fn init_store(config: &Config) -> Result<Arc<RecordStore>, InitializationError> {
    let store = RecordStore::open(&config.data_file).await?;
    log::info!("Visitor log at {}", store.path().display());
    Ok(Arc::new(store))
}
