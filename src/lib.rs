//! visitor_log library: a small visitor-logging HTTP service
//!
//! Visitors are recorded as lines in a flat CSV file, at most one per IP per
//! calendar day. The file can be listed as JSON or downloaded as-is, and a
//! daily background sweep drops records older than the retention window.
//!
//! # Example
//!
//! ```no_run
//! use visitor_log::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     retention_days: 7,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod retention;
pub mod server;
pub mod storage;

// Re-export public API
pub use app::{run_server, run_server_with, run_server_with_store, shutdown_signal};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ApiError, StoreError};
pub use storage::{AppendOutcome, RecordStore, VisitorRecord};
