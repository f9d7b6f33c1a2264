//! Visitor log persistence.
//!
//! The log is one plain-text CSV file: a fixed header line followed by one
//! line per visit. [`RecordStore`] owns the file and serializes all access to
//! it; [`VisitorRecord`] handles the per-line encoding.

mod record;
mod store;

// Re-export public API
pub use record::{date_portion, key_fields, split_fields, VisitorRecord};
pub use store::{AppendOutcome, RecordStore, RewriteOutcome};
