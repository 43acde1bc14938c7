//! Per-day timeline figures.
//!
//! | Figure | Definition |
//! |--------|-----------|
//! | Job count | Jobs placed that day |
//! | Travel minutes / km | Sum over synthesized travel segments |
//! | First start / last end | Bounds of the job blocks |
//! | Utilization | Job block minutes over working-day minutes |
//! | Overrun | Last job ends after the working day |

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::NormalizerConfig;
use crate::timeline::Timeline;

/// Figures for one worker-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub resource_id: String,
    pub day: NaiveDate,
    pub job_count: usize,
    pub travel_count: usize,
    /// Total synthesized travel time (minutes).
    pub travel_minutes: u32,
    /// Total synthesized travel distance (km).
    pub travel_km: u32,
    pub first_start: Option<DateTime<Utc>>,
    pub last_end: Option<DateTime<Utc>>,
    /// Job block time over the working day (may exceed 1.0).
    pub utilization: f64,
    /// Whether the last job ends after the configured end of day.
    pub overruns_workday: bool,
}

impl TimelineSummary {
    /// Computes the figures of one timeline.
    pub fn calculate(timeline: &Timeline, config: &NormalizerConfig) -> Self {
        let travel_minutes = timeline.travel.iter().map(|t| t.duration_minutes).sum();
        let travel_km = timeline.travel.iter().map(|t| t.distance_km).sum();
        let busy = timeline
            .jobs
            .iter()
            .fold(TimeDelta::zero(), |acc, j| acc + j.duration());

        let workday_minutes =
            i64::from(config.workday_end_hour.saturating_sub(config.workday_start_hour)) * 60;
        let utilization = if workday_minutes == 0 {
            0.0
        } else {
            busy.num_minutes() as f64 / workday_minutes as f64
        };

        let workday_end = config
            .offset()
            .from_local_datetime(&timeline.day.and_time(NaiveTime::MIN))
            .single()
            .map(|midnight| {
                midnight.with_timezone(&Utc) + TimeDelta::hours(i64::from(config.workday_end_hour))
            });
        let last_end = timeline.end();
        let overruns_workday = matches!((last_end, workday_end), (Some(end), Some(limit)) if end > limit);

        Self {
            resource_id: timeline.resource_id.clone(),
            day: timeline.day,
            job_count: timeline.jobs.len(),
            travel_count: timeline.travel.len(),
            travel_minutes,
            travel_km,
            first_start: timeline.start(),
            last_end,
            utilization,
            overruns_workday,
        }
    }
}
