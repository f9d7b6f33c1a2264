//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through an environment
//! variable, which is how the service is usually configured when deployed.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RETENTION_DAYS, DEFAULT_SWEEP_TIME,
};
pub use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Parses a local wall-clock time in `HH:MM` form.
pub fn parse_sweep_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| format!("invalid sweep time '{}' (expected HH:MM): {}", value, e))
}

/// Service configuration.
///
/// Parsed from the command line with environment fallbacks, or constructed
/// programmatically (tests do this with `..Default::default()`).
///
/// # Examples
///
/// ```no_run
/// use visitor_log::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     port: 8080,
///     data_file: PathBuf::from("/var/lib/visitor_log/index.csv"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "visitor_log", version, about)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "VISITOR_LOG_HOST", default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Path of the CSV visitor log
    #[arg(long, env = "VISITOR_LOG_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Records older than this many days are removed by the daily sweep
    #[arg(long, env = "VISITOR_LOG_RETENTION_DAYS", default_value_t = DEFAULT_RETENTION_DAYS)]
    pub retention_days: u32,

    /// Local time of day (HH:MM) the retention sweep runs at
    #[arg(
        long,
        env = "VISITOR_LOG_SWEEP_TIME",
        default_value = DEFAULT_SWEEP_TIME,
        value_parser = parse_sweep_time
    )]
    pub sweep_time: NaiveTime,

    /// Log level
    #[arg(long, value_enum, env = "VISITOR_LOG_LEVEL", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, env = "VISITOR_LOG_FORMAT", default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            retention_days: DEFAULT_RETENTION_DAYS,
            sweep_time: NaiveTime::MIN,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks values clap cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention_days == 0 {
            return Err(ConfigError::ZeroRetention);
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        Ok(())
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Retention window as an exact duration (`retention_days` x 24h).
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }
}
