//! Error type definitions.
//!
//! This module defines the storage, configuration and initialization errors
//! used throughout the application.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for record store operations.
///
/// Every variant keeps the path of the visitor log and the underlying I/O error
/// so the cause can be logged server-side.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading the visitor log failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the visitor log
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Appending to or rewriting the visitor log failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Path of the visitor log
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Creating the visitor log (or its directory) failed.
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        /// Path that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True for failures while reading the log (as opposed to writing it).
    pub fn is_read(&self) -> bool {
        matches!(self, StoreError::Read { .. })
    }
}

/// Error types for configuration validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero-day retention window would delete every record on each sweep.
    #[error("Retention window must be at least one day")]
    ZeroRetention,

    /// No path was given for the visitor log.
    #[error("Data file path must not be empty")]
    EmptyDataFile,
}

/// Error types for startup failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The visitor log could not be bootstrapped.
    #[error("Record store initialization error: {0}")]
    StoreError(#[from] StoreError),

    /// The HTTP listener could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    BindError {
        /// Address that was requested
        addr: std::net::SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}
