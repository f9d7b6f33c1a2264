//! Configuration constants.
//!
//! This module defines the fixed values shared by the store, the HTTP surface,
//! and the retention sweeper.

/// Default listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address (all interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default location of the persisted visitor log.
pub const DEFAULT_DATA_FILE: &str = "assets/pnc/index.csv";

/// Header line written at the top of every visitor log.
pub const CSV_HEADER: &str = "IP,Region,DateTime,longLat";

/// Field delimiter used in the visitor log.
pub const FIELD_DELIMITER: char = ',';

/// Number of fields in a well-formed record line.
pub const RECORD_FIELD_COUNT: usize = 4;

/// Lines with fewer fields than this are discarded by the retention sweep.
/// The sweep only needs the timestamp, which is the third field.
pub const MIN_SWEEP_FIELD_COUNT: usize = 3;

/// Default retention window in days.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Default local wall-clock time the retention sweep fires at (`HH:MM`).
pub const DEFAULT_SWEEP_TIME: &str = "00:00";

/// File name offered to clients by the export endpoint.
pub const DOWNLOAD_FILE_NAME: &str = "index.csv";
