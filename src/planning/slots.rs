//! Day-slot placement for jobs dropped onto a planning board.
//!
//! Slots are whole hours in the configured offset. A day fills up from
//! `workday_start_hour`, one visual block after another, and accepts no
//! job whose start would fall after `latest_start_hour`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};

use crate::config::NormalizerConfig;
use crate::error::ScheduleError;
use crate::models::{later_by, Job};
use crate::timeline::calendar_day;

/// Start of the next free slot for `resource_id` on `day`.
///
/// Considers the jobs in `jobs` assigned to that worker with a requested
/// start on that day. An empty day yields `workday_start_hour`; otherwise
/// the slot is the latest start's hour plus the visual duration.
///
/// # Errors
/// [`ScheduleError::DayFull`] when the slot would start after
/// `latest_start_hour`.
pub fn next_free_slot(
    jobs: &[Job],
    resource_id: &str,
    day: NaiveDate,
    config: &NormalizerConfig,
) -> Result<DateTime<Utc>, ScheduleError> {
    let offset = config.offset();
    let latest = jobs
        .iter()
        .filter(|j| j.resource_id.as_deref() == Some(resource_id))
        .filter_map(|j| j.requested_start)
        .filter(|start| calendar_day(*start, offset) == day)
        .max();

    let hour = match latest {
        None => config.workday_start_hour,
        Some(start) => start
            .with_timezone(&offset)
            .hour()
            .saturating_add(config.visual_duration_hours),
    };

    if hour > config.latest_start_hour {
        tracing::debug!(resource = resource_id, %day, hour, "day is full");
        return Err(ScheduleError::DayFull {
            resource_id: resource_id.to_string(),
            day,
        });
    }

    at_hour(day, hour, config).ok_or_else(|| ScheduleError::DayFull {
        resource_id: resource_id.to_string(),
        day,
    })
}

/// Start of the slot in board row `row` (0 = `workday_start_hour`).
///
/// Rows past the last bookable hour clamp to `latest_start_hour`.
pub fn slot_at_row(day: NaiveDate, row: u32, config: &NormalizerConfig) -> Option<DateTime<Utc>> {
    let hour = config
        .workday_start_hour
        .saturating_add(row)
        .min(config.latest_start_hour);
    at_hour(day, hour, config)
}

fn at_hour(day: NaiveDate, hour: u32, config: &NormalizerConfig) -> Option<DateTime<Utc>> {
    config
        .offset()
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .single()
        .map(|midnight| later_by(midnight.with_timezone(&Utc), TimeDelta::hours(i64::from(hour))))
}
