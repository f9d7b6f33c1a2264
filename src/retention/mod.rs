//! Age-based retention for the visitor log.
//!
//! Once a day, at a configured local time, every record whose `dateTime` is
//! older than the retention window (or cannot be parsed at all) is removed
//! and the file is rewritten. The sweep goes through the record store's lock
//! like any request, so captures arriving mid-sweep are never lost.

mod sweeper;
mod timestamp;

// Re-export public API
pub use sweeper::{
    is_retained, next_fire_after, run_sweep, spawn_sweeper, sweep_at, SweepSchedule,
};
pub use timestamp::parse_timestamp;
