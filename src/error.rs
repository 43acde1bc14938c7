//! Error types.
//!
//! Business-data anomalies (unassigned jobs, missing estimates, jobs in the
//! same instant) never surface here; they are absorbed by the pipeline.
//! Only contract violations reach the caller.

use chrono::NaiveDate;

use crate::validation::ValidationError;

/// Errors reported to the caller of the normalizer.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The input violated a structural contract (duplicate ids, bad intervals).
    #[error("invalid schedule input ({} problem(s)): {}", .0.len(), first_message(.0))]
    Validation(Vec<ValidationError>),

    /// An external travel segment overlaps a synthesized one.
    #[error(
        "external travel segment '{external_id}' overlaps synthesized segment \
         '{synthesized_id}' for resource '{resource_id}'"
    )]
    TravelConflict {
        resource_id: String,
        external_id: String,
        synthesized_id: String,
    },

    /// No start slot is left on the requested day.
    #[error("no free slot left on {day} for resource '{resource_id}'")]
    DayFull { resource_id: String, day: NaiveDate },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Errors produced by travel estimator adapters.
///
/// These never fail a normalization pass: the resolver logs them and falls
/// back to the configured default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// The adapter has no data for this pair yet.
    #[error("no route data from '{from}' to '{to}'")]
    Unavailable { from: String, to: String },

    /// The adapter tried and failed.
    #[error("travel estimate failed: {0}")]
    Failed(String),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}
