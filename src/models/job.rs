//! Job model.
//!
//! A job is one schedulable visit assigned to a worker with a desired start
//! time. Jobs are owned by the external scheduling store; the normalizer only
//! reads them.
//!
//! # Durations
//! A job's layout width is the *visual* duration: a canonical block size
//! from configuration, optionally overridden per job. The separate
//! `estimated_hours` field belongs to invoicing and planning and never
//! influences the timeline.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::TravelEstimate;

/// Whether a job's placement has been confirmed.
///
/// Locked jobs are rendered differently but obey exactly the same cascade
/// rules as drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Tentatively placed.
    #[default]
    Draft,
    /// Confirmed with the customer.
    Locked,
}

/// A job to be laid out on a worker's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Assigned worker. `None` = unassigned (excluded from every timeline).
    pub resource_id: Option<String>,
    /// Desired start. `None` = missing or unparsable upstream.
    pub requested_start: Option<DateTime<Utc>>,
    /// Per-job override of the configured visual block length (hours).
    pub visual_duration_hours: Option<u32>,
    pub lifecycle: LifecycleState,
    /// Estimated effort for invoicing. Not used for layout.
    pub estimated_hours: Option<f64>,
    /// Travel to the following job, pre-computed by an enrichment step.
    pub travel_hint_to_next: Option<TravelEstimate>,
    /// Human-facing job number.
    pub task_number: Option<String>,
    pub company_name: Option<String>,
    /// Full site address (street, postal code, city).
    pub address: Option<String>,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

impl Job {
    /// Creates an unassigned draft job with no start.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_id: None,
            requested_start: None,
            visual_duration_hours: None,
            lifecycle: LifecycleState::Draft,
            estimated_hours: None,
            travel_hint_to_next: None,
            task_number: None,
            company_name: None,
            address: None,
            attributes: HashMap::new(),
        }
    }

    /// Assigns the job to a worker.
    pub fn assigned_to(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Sets the requested start.
    pub fn starting_at(mut self, start: DateTime<Utc>) -> Self {
        self.requested_start = Some(start);
        self
    }

    /// Overrides the visual block length.
    pub fn with_visual_duration_hours(mut self, hours: u32) -> Self {
        self.visual_duration_hours = Some(hours);
        self
    }

    /// Sets the lifecycle state.
    pub fn with_lifecycle(mut self, lifecycle: LifecycleState) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Marks the job as locked.
    pub fn locked(self) -> Self {
        self.with_lifecycle(LifecycleState::Locked)
    }

    /// Sets the estimated effort.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Attaches a travel hint towards the next job.
    pub fn with_travel_hint(mut self, hint: TravelEstimate) -> Self {
        self.travel_hint_to_next = Some(hint);
        self
    }

    /// Sets the site address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The worker, treating a blank id as none.
    pub fn assigned_resource(&self) -> Option<&str> {
        self.resource_id.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Whether the job has a worker.
    pub fn is_assigned(&self) -> bool {
        self.assigned_resource().is_some()
    }

    /// Layout width: the job's override, else `default`.
    pub fn visual_duration(&self, default: TimeDelta) -> TimeDelta {
        self.visual_duration_hours
            .map(|h| TimeDelta::hours(i64::from(h)))
            .unwrap_or(default)
    }
}
