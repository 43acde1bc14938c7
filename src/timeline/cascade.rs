//! Cascade normalizer.
//!
//! # Algorithm
//! A single left-to-right fold over one sorted worker-day with a running
//! cursor (the previous job's end):
//! 1. snap the requested start down to the hour,
//! 2. if the snapped start is before the cursor, start at the cursor,
//! 3. end = start + visual duration,
//! 4. advance the cursor to that end.
//!
//! Travel is not considered here; the synthesizer pushes jobs further when
//! it inserts segments.
//!
//! # Complexity
//! O(n) per group.

use chrono::{DateTime, FixedOffset, TimeDelta, Timelike, Utc};

use super::{GroupKey, SortedJob};
use crate::models::{later_by, NormalizedJob};

/// Floors `t` to the start of its hour in `offset`.
pub fn snap_to_hour(t: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = t.with_timezone(&offset);
    let into_hour = TimeDelta::seconds(i64::from(local.minute() * 60 + local.second()))
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
    t - into_hour
}

/// Lays out one sorted worker-day.
///
/// `default_duration` applies to jobs without their own visual override.
pub fn normalize(
    key: &GroupKey,
    entries: &[SortedJob],
    default_duration: TimeDelta,
    offset: FixedOffset,
) -> Vec<NormalizedJob> {
    entries
        .iter()
        .scan(None::<DateTime<Utc>>, |cursor, entry| {
            let snapped = snap_to_hour(entry.requested_start, offset);
            let start = match *cursor {
                Some(c) if snapped < c => c,
                _ => snapped,
            };
            let end = later_by(start, entry.job.visual_duration(default_duration));
            *cursor = Some(end);
            Some(NormalizedJob {
                job: entry.job.clone(),
                resource_id: key.resource_id.clone(),
                day: key.day,
                start,
                end,
            })
        })
        .collect()
}
