//! Input validation for normalization passes.
//!
//! Separates contract violations from business-data anomalies. Jobs
//! without a worker, jobs in the same instant or missing travel figures are
//! fine and handled by the pipeline. What is checked here would make the
//! output ambiguous or meaningless:
//! - Duplicate or empty job IDs (ids key travel segments and break ties)
//! - Visual duration overrides of zero or more than a day
//! - Duplicate external travel IDs
//! - External travel ending before it starts

use crate::config::MAX_VISUAL_DURATION_HOURS;
use crate::models::{Job, TravelSegment};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An ID is empty or blank.
    EmptyId,
    /// A job overrides its visual duration with zero hours.
    ZeroDuration,
    /// A job overrides its visual duration with more than a day.
    DurationTooLong,
    /// An interval ends before it starts.
    InvalidInterval,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the inputs of a normalization pass.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(jobs: &[Job], external_travel: &[TravelSegment]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut job_ids = HashSet::new();
    for job in jobs {
        if job.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                "Job with empty ID",
            ));
        } else if !job_ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        match job.visual_duration_hours {
            Some(0) => errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Job '{}' has a zero visual duration", job.id),
            )),
            Some(hours) if hours > MAX_VISUAL_DURATION_HOURS => errors.push(ValidationError::new(
                ValidationErrorKind::DurationTooLong,
                format!(
                    "Job '{}' has a visual duration of {hours}h (max {MAX_VISUAL_DURATION_HOURS}h)",
                    job.id
                ),
            )),
            _ => {}
        }
    }

    let mut travel_ids = HashSet::new();
    for segment in external_travel {
        if !travel_ids.insert(segment.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate travel segment ID: {}", segment.id),
            ));
        }
        if segment.end < segment.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Travel segment '{}' ends at {} before it starts at {}",
                    segment.id, segment.end, segment.start
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_input() {
        let jobs = vec![
            Job::new("J1").assigned_to("T1").starting_at(at(9)),
            Job::new("J2").starting_at(at(9)),
        ];
        let travel = vec![TravelSegment::external("home-J1", "T1", at(8), at(9), 10)];
        assert!(validate_input(&jobs, &travel).is_ok());
    }

    #[test]
    fn test_duplicate_job_id() {
        let jobs = vec![Job::new("J1"), Job::new("J1")];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].to_string(), "Duplicate job ID: J1");
    }

    #[test]
    fn test_empty_id_and_zero_duration() {
        let jobs = vec![Job::new(" "), Job::new("J2").with_visual_duration_hours(0)];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::EmptyId, ValidationErrorKind::ZeroDuration]
        );
    }

    #[test]
    fn test_overlong_duration_rejected() {
        let jobs = vec![
            Job::new("J1").with_visual_duration_hours(MAX_VISUAL_DURATION_HOURS),
            Job::new("J2").with_visual_duration_hours(u32::MAX),
        ];
        let errors = validate_input(&jobs, &[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DurationTooLong);
        assert!(errors[0].message.contains("'J2'"));
    }

    #[test]
    fn test_external_travel_checks() {
        let travel = vec![
            TravelSegment::external("a", "T1", at(8), at(9), 1),
            TravelSegment::external("a", "T1", at(10), at(11), 1),
            TravelSegment::external("b", "T1", at(12), at(11), 1),
        ];
        let errors = validate_input(&[], &travel).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[1].kind, ValidationErrorKind::InvalidInterval);
    }

    #[test]
    fn test_all_errors_collected() {
        let jobs = vec![Job::new("J1"), Job::new("J1"), Job::new("")];
        let travel = vec![TravelSegment::external("x", "T1", at(12), at(11), 1)];
        let errors = validate_input(&jobs, &travel).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
