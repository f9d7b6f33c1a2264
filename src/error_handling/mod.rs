//! Error types for the service.
//!
//! This module provides:
//! - Storage errors raised by the record store
//! - API errors and their mapping to HTTP responses
//! - Startup (configuration, logger, bind) errors
//!
//! Storage failures never reach the client verbatim: the API layer logs the
//! underlying cause and replies with a fixed, generic message.

mod api;
mod types;

// Re-export public API
pub use api::ApiError;
pub use types::{ConfigError, InitializationError, StoreError};
