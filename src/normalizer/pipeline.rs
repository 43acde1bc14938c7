//! Timeline normalization pipeline.
//!
//! # Algorithm
//!
//! 1. Validate configuration and input contracts.
//! 2. Group assigned jobs per worker-day and sort them (builder).
//! 3. Per group: cascade, then insert travel and re-cascade.
//! 4. Check external travel against synthesized travel (conflict policy).
//! 5. Merge everything into one flat event list.
//!
//! Each call recomputes everything from its arguments. Nothing is cached
//! between calls, so identical inputs give identical output.
//!
//! # Complexity
//! O(n log n) for sorting, O(n) per group afterwards, plus
//! O(e * t) for the conflict check (e external, t synthesized segments).

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::{NormalizerConfig, TravelConflictPolicy};
use crate::error::ScheduleError;
use crate::models::{Event, Job, NormalizedJob, ResourceRegistry, TravelSegment};
use crate::routing::{TravelEstimator, TravelResolver};
use crate::timeline::{
    build, find_travel_conflicts, insert_travel, merge, normalize, Exclusion, Timeline,
};
use crate::validation::validate_input;

use super::TimelineSummary;

/// Result of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSchedule {
    /// Flat renderable list: jobs, synthesized travel, external travel.
    pub events: Vec<Event>,
    /// One timeline per worker-day, ordered by worker then day.
    pub timelines: Vec<Timeline>,
    /// Jobs left out, with the reason.
    pub excluded: Vec<Exclusion>,
    /// Jobs whose missing start was replaced by the clock's "now".
    pub coerced_starts: Vec<String>,
    /// External travel dropped for lacking a worker.
    pub dropped_external: Vec<String>,
    /// Worker ids referenced by jobs but absent from the registry.
    pub unknown_resources: Vec<String>,
}

impl NormalizedSchedule {
    /// Looks up an event by id.
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    /// Looks up a placed job by id.
    pub fn job(&self, id: &str) -> Option<&NormalizedJob> {
        self.events.iter().filter_map(Event::as_job).find(|j| j.id() == id)
    }

    /// The timeline of one worker-day.
    pub fn timeline(&self, resource_id: &str, day: NaiveDate) -> Option<&Timeline> {
        self.timelines
            .iter()
            .find(|t| t.resource_id == resource_id && t.day == day)
    }

    /// All timelines of one worker.
    pub fn timelines_for(&self, resource_id: &str) -> Vec<&Timeline> {
        self.timelines
            .iter()
            .filter(|t| t.resource_id == resource_id)
            .collect()
    }

    /// Per-day summaries, in timeline order.
    pub fn summaries(&self, config: &NormalizerConfig) -> Vec<TimelineSummary> {
        self.timelines
            .iter()
            .map(|t| TimelineSummary::calculate(t, config))
            .collect()
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Lays out jobs on per-worker daily timelines with travel in between.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use crew_timeline::models::Job;
/// use crew_timeline::normalizer::TimelineNormalizer;
///
/// let nine = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
/// let half_past = Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap();
/// let jobs = vec![
///     Job::new("J1").assigned_to("T1").starting_at(nine),
///     Job::new("J2").assigned_to("T1").starting_at(half_past),
/// ];
///
/// let schedule = TimelineNormalizer::new().run(&jobs, &[]).unwrap();
/// assert_eq!(schedule.event_count(), 3);
/// let j2 = schedule.job("J2").unwrap();
/// assert_eq!(j2.start, Utc.with_ymd_and_hms(2024, 3, 4, 11, 15, 0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TimelineNormalizer {
    config: NormalizerConfig,
    estimator: Option<Arc<dyn TravelEstimator>>,
    clock: Arc<dyn Clock>,
    registry: Option<ResourceRegistry>,
}

impl TimelineNormalizer {
    /// Creates a normalizer with default configuration, no estimator and
    /// the system clock.
    pub fn new() -> Self {
        Self {
            config: NormalizerConfig::default(),
            estimator: None,
            clock: Arc::new(SystemClock),
            registry: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the travel estimator consulted when a job carries no hint.
    pub fn with_estimator<E: TravelEstimator + 'static>(self, estimator: E) -> Self {
        self.with_shared_estimator(Arc::new(estimator))
    }

    /// Sets a shared travel estimator.
    pub fn with_shared_estimator(mut self, estimator: Arc<dyn TravelEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Sets the clock used to coerce missing starts.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets the resource registry used to report unknown workers.
    pub fn with_registry(mut self, registry: ResourceRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Runs one full normalization pass.
    ///
    /// # Errors
    /// - [`ScheduleError::Config`] for an out-of-range configuration
    /// - [`ScheduleError::Validation`] for duplicate ids and malformed
    ///   external intervals
    /// - [`ScheduleError::TravelConflict`] when external travel overlaps
    ///   synthesized travel and the policy is [`TravelConflictPolicy::Reject`]
    pub fn run(
        &self,
        jobs: &[Job],
        external_travel: &[TravelSegment],
    ) -> Result<NormalizedSchedule, ScheduleError> {
        self.config.validate()?;
        validate_input(jobs, external_travel).map_err(ScheduleError::Validation)?;

        let unknown_resources = match &self.registry {
            Some(registry) => registry.unknown_resources(jobs),
            None => Vec::new(),
        };
        if !unknown_resources.is_empty() {
            tracing::warn!(resources = ?unknown_resources, "jobs reference unregistered resources");
        }

        let offset = self.config.offset();
        let grouping = build(jobs, self.config.missing_start, offset, self.clock.as_ref());
        let coerced_starts = grouping.coerced_starts();
        if !coerced_starts.is_empty() {
            tracing::warn!(jobs = ?coerced_starts, "missing start times coerced to now");
        }

        let fallback = self.config.default_travel();
        let resolver = TravelResolver::new(self.estimator.as_deref(), &fallback);
        let visual = self.config.visual_duration();

        let timelines: Vec<Timeline> = grouping
            .groups
            .iter()
            .map(|(key, entries)| {
                let cascaded = normalize(key, entries, visual, offset);
                let (jobs, travel) = insert_travel(&cascaded, &resolver, self.config.gap_policy);
                tracing::debug!(
                    resource = %key.resource_id,
                    day = %key.day,
                    jobs = jobs.len(),
                    "normalized timeline"
                );
                Timeline {
                    resource_id: key.resource_id.clone(),
                    day: key.day,
                    jobs,
                    travel,
                }
            })
            .collect();

        let placed: Vec<NormalizedJob> = timelines.iter().flat_map(|t| t.jobs.iter().cloned()).collect();
        let synthesized: Vec<TravelSegment> =
            timelines.iter().flat_map(|t| t.travel.iter().cloned()).collect();

        if self.config.travel_conflicts == TravelConflictPolicy::Reject {
            if let Some(conflict) = find_travel_conflicts(&synthesized, external_travel).into_iter().next() {
                return Err(ScheduleError::TravelConflict {
                    resource_id: conflict.resource_id,
                    external_id: conflict.external_id,
                    synthesized_id: conflict.synthesized_id,
                });
            }
        }

        let merged = merge(&placed, &synthesized, external_travel);

        Ok(NormalizedSchedule {
            events: merged.events,
            timelines,
            excluded: grouping.excluded,
            coerced_starts,
            dropped_external: merged.dropped_external,
            unknown_resources,
        })
    }
}

impl Default for TimelineNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
