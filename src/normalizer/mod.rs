//! Normalization pipeline and per-day figures.
//!
//! [`TimelineNormalizer`] strings the timeline stages together into one
//! deterministic pass. [`TimelineSummary`] reports travel totals,
//! utilization and workday overruns for each resulting worker-day.

mod pipeline;
mod summary;

pub use pipeline::{NormalizedSchedule, TimelineNormalizer};
pub use summary::TimelineSummary;
