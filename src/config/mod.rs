//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, file format, retention window)
//! - CLI/env option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{parse_sweep_time, Config, ConfigError, LogFormat, LogLevel};
