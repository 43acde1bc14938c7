//! Per-worker daily timeline normalization for field-service calendars.
//!
//! Turns loosely-timed job records into a clean, non-overlapping timeline
//! per worker and calendar day, with travel segments between consecutive
//! jobs. Every pass is a pure function of its inputs and configuration:
//! re-running it on unchanged data gives identical output.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `TravelEstimate`, `TravelSegment`,
//!   `NormalizedJob`, `Event`, `Resource`, `ResourceRegistry`, `TaskRecord`
//! - **`timeline`**: The pipeline stages: grouping, cascade, travel
//!   synthesis, merge
//! - **`normalizer`**: `TimelineNormalizer` and per-day `TimelineSummary`
//! - **`routing`**: `TravelEstimator` seam, route cache, home legs
//! - **`planning`**: Slot placement and drag/resize handling
//! - **`config`**, **`clock`**, **`error`**, **`validation`**: Settings,
//!   injected time, error types and input checks
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use crew_timeline::{Job, NormalizerConfig, TimelineNormalizer};
//!
//! let jobs = vec![
//!     Job::new("J1").assigned_to("T1").starting_at(Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()),
//!     Job::new("J2").assigned_to("T1").starting_at(Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap()),
//! ];
//! let schedule = TimelineNormalizer::new()
//!     .with_config(NormalizerConfig::default())
//!     .run(&jobs, &[])
//!     .unwrap();
//!
//! let day = schedule.timelines[0].events();
//! let ids: Vec<&str> = day.iter().map(|e| e.id()).collect();
//! assert_eq!(ids, ["J1", "travel-J1-J2", "J2"]);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod planning;
pub mod routing;
pub mod timeline;
pub mod validation;

pub use config::NormalizerConfig;
pub use error::ScheduleError;
pub use models::{Event, Job, TravelSegment};
pub use normalizer::{NormalizedSchedule, TimelineNormalizer};
