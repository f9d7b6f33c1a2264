//! Daily retention sweep.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::{error, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error_handling::StoreError;
use crate::storage::{key_fields, RecordStore, RewriteOutcome};

use super::timestamp::parse_timestamp;

/// When the sweep fires and how much history it keeps.
#[derive(Debug, Clone, Copy)]
pub struct SweepSchedule {
    /// Local wall-clock time of the daily run.
    pub fire_at: NaiveTime,
    /// Records older than `now - retention` are removed.
    pub retention: Duration,
}

/// Whether a record line survives a sweep with the given cutoff.
///
/// Lines with fewer than three fields or an unparseable timestamp never do.
pub fn is_retained(line: &str, cutoff: DateTime<Utc>) -> bool {
    key_fields(line)
        .and_then(|(_, date_time)| parse_timestamp(date_time))
        .is_some_and(|recorded| recorded >= cutoff)
}

/// Removes every record older than `now - retention`.
///
/// The cutoff is an exact offset, not truncated to a calendar day, and is
/// inclusive: a record stamped exactly at the cutoff is kept.
pub async fn sweep_at(
    store: &RecordStore,
    now: DateTime<Utc>,
    retention: Duration,
) -> Result<RewriteOutcome, StoreError> {
    let cutoff = now - retention;
    store.rewrite_filtered(|line| is_retained(line, cutoff)).await
}

/// Runs one sweep against the current time, logging instead of failing.
///
/// There is no caller to report to; a failed sweep is retried from scratch
/// at the next scheduled firing.
pub async fn run_sweep(store: &RecordStore, retention: Duration) -> Option<RewriteOutcome> {
    info!("Running retention sweep...");
    match sweep_at(store, Utc::now(), retention).await {
        Ok(outcome) if !outcome.rewritten => {
            info!("Retention sweep skipped: no records");
            Some(outcome)
        }
        Ok(outcome) => {
            info!(
                "Retention sweep completed: kept {}, removed {}",
                outcome.kept, outcome.removed
            );
            Some(outcome)
        }
        Err(e) => {
            error!("Error during retention sweep: {}", e);
            None
        }
    }
}

/// Next instant strictly after `now` whose local time is `at`.
///
/// If `at` falls into a DST gap on some day, the run moves one hour later.
pub fn next_fire_after<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let mut date = now.date_naive();

    for _ in 0..3 {
        if let Some(candidate) = resolve_local(&tz, date.and_time(at)) {
            if candidate > *now {
                return candidate;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    now.clone() + Duration::days(1)
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// Spawns the background task that sweeps once a day until cancelled.
pub fn spawn_sweeper(
    store: Arc<RecordStore>,
    schedule: SweepSchedule,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::task::spawn(async move {
        loop {
            let now = Local::now();
            let next = next_fire_after(&now, schedule.fire_at);
            let wait = (next.clone() - now).to_std().unwrap_or_default();
            info!("Next retention sweep at {}", next.format("%Y-%m-%d %H:%M:%S %:z"));

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    run_sweep(&store, schedule.retention).await;
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
        info!("Retention sweeper stopped");
    })
}
