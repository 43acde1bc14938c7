//! Normalizer configuration.
//!
//! All layout constants live here rather than in the algorithms. The
//! visual block length in particular is a named setting: it is deliberately
//! decoupled from any estimated-effort figure a job carries.
//!
//! # Loading
//!
//! ```
//! use crew_timeline::config::{GapPolicy, NormalizerConfig};
//!
//! let config = NormalizerConfig::from_json(r#"{ "visual_duration_hours": 3 }"#).unwrap();
//! assert_eq!(config.visual_duration_hours, 3);
//! assert_eq!(config.default_travel_minutes, 15);
//! assert_eq!(config.gap_policy, GapPolicy::Close);
//! ```

use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::TravelEstimate;

/// Canonical block length for every job on the timeline (hours).
pub const DEFAULT_VISUAL_DURATION_HOURS: u32 = 2;
/// Longest visual block a job may occupy (hours).
pub const MAX_VISUAL_DURATION_HOURS: u32 = 24;
/// Travel time used when neither a hint nor the estimator has data (minutes).
pub const DEFAULT_TRAVEL_MINUTES: u32 = 15;
/// Travel distance used alongside [`DEFAULT_TRAVEL_MINUTES`] (km).
pub const DEFAULT_TRAVEL_KM: f64 = 1.0;

/// How idle time between a travel segment and the next job is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Pull every job after the first to the end of the preceding travel.
    #[default]
    Close,
    /// Only push jobs forward on overlap; gaps the input implied are kept.
    Preserve,
}

/// What happens when an external travel segment overlaps a synthesized one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelConflictPolicy {
    /// Fail the pass with [`ScheduleError::TravelConflict`].
    #[default]
    Reject,
    /// Keep both; the caller owns reconciliation.
    Allow,
}

/// Treatment of jobs without a usable requested start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStartPolicy {
    /// Coerce to the clock's current instant.
    #[default]
    Now,
    /// Leave the job out and report it as excluded.
    Exclude,
}

/// Configuration for a [`TimelineNormalizer`](crate::normalizer::TimelineNormalizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Block length for jobs without their own override (hours).
    pub visual_duration_hours: u32,
    /// Fallback travel time (minutes).
    pub default_travel_minutes: u32,
    /// Fallback travel distance (km).
    pub default_travel_km: f64,
    /// Offset defining calendar days and hour boundaries (seconds east of UTC).
    pub utc_offset_seconds: i32,
    pub gap_policy: GapPolicy,
    pub travel_conflicts: TravelConflictPolicy,
    pub missing_start: MissingStartPolicy,
    /// First bookable hour of a working day.
    pub workday_start_hour: u32,
    /// Latest hour a job may be placed to start.
    pub latest_start_hour: u32,
    /// Hour the working day ends.
    pub workday_end_hour: u32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            visual_duration_hours: DEFAULT_VISUAL_DURATION_HOURS,
            default_travel_minutes: DEFAULT_TRAVEL_MINUTES,
            default_travel_km: DEFAULT_TRAVEL_KM,
            utc_offset_seconds: 0,
            gap_policy: GapPolicy::Close,
            travel_conflicts: TravelConflictPolicy::Reject,
            missing_start: MissingStartPolicy::Now,
            workday_start_hour: 7,
            latest_start_hour: 16,
            workday_end_hour: 17,
        }
    }
}

impl NormalizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the visual block length.
    pub fn with_visual_duration_hours(mut self, hours: u32) -> Self {
        self.visual_duration_hours = hours;
        self
    }

    /// Sets the fallback travel estimate.
    pub fn with_default_travel(mut self, minutes: u32, km: f64) -> Self {
        self.default_travel_minutes = minutes;
        self.default_travel_km = km;
        self
    }

    /// Sets the day-boundary offset (seconds east of UTC).
    pub fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Sets the gap policy.
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// Sets the travel conflict policy.
    pub fn with_travel_conflicts(mut self, policy: TravelConflictPolicy) -> Self {
        self.travel_conflicts = policy;
        self
    }

    /// Sets the missing-start policy.
    pub fn with_missing_start(mut self, policy: MissingStartPolicy) -> Self {
        self.missing_start = policy;
        self
    }

    /// Sets the working-day hours.
    pub fn with_workday(mut self, start_hour: u32, latest_start_hour: u32, end_hour: u32) -> Self {
        self.workday_start_hour = start_hour;
        self.latest_start_hour = latest_start_hour;
        self.workday_end_hour = end_hour;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.visual_duration_hours == 0 {
            return Err(ScheduleError::Config(
                "visual_duration_hours must be positive".into(),
            ));
        }
        if self.visual_duration_hours > MAX_VISUAL_DURATION_HOURS {
            return Err(ScheduleError::Config(format!(
                "visual_duration_hours must be at most {MAX_VISUAL_DURATION_HOURS}, got {}",
                self.visual_duration_hours
            )));
        }
        if self.default_travel_minutes == 0 {
            return Err(ScheduleError::Config(
                "default_travel_minutes must be positive".into(),
            ));
        }
        if !self.default_travel_km.is_finite() || self.default_travel_km < 0.0 {
            return Err(ScheduleError::Config(format!(
                "default_travel_km must be a non-negative number, got {}",
                self.default_travel_km
            )));
        }
        if FixedOffset::east_opt(self.utc_offset_seconds).is_none() {
            return Err(ScheduleError::Config(format!(
                "utc_offset_seconds out of range: {}",
                self.utc_offset_seconds
            )));
        }
        if !(self.workday_start_hour <= self.latest_start_hour
            && self.latest_start_hour < self.workday_end_hour
            && self.workday_end_hour <= 24)
        {
            return Err(ScheduleError::Config(format!(
                "workday hours must satisfy start <= latest start < end <= 24, got {}/{}/{}",
                self.workday_start_hour, self.latest_start_hour, self.workday_end_hour
            )));
        }
        Ok(())
    }

    /// Day-boundary offset. Out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Visual block length as a duration.
    pub fn visual_duration(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.visual_duration_hours))
    }

    /// The fallback travel estimate.
    pub fn default_travel(&self) -> TravelEstimate {
        TravelEstimate::new(self.default_travel_minutes, self.default_travel_km)
    }
}
