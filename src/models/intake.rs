//! Intake of task records from the scheduling store.
//!
//! The store speaks camelCase JSON with loosely typed fields: timestamps
//! as strings, the worker under one of two keys, travel figures under
//! underscore-prefixed enrichment keys. [`TaskRecord`] mirrors that shape
//! and [`TaskRecord::into_job`] maps it onto a [`Job`].
//!
//! Malformed timestamps are not rejected here. They become `None` and the
//! normalizer's missing-start policy decides what happens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Job, LifecycleState, TravelEstimate};
use crate::config::DEFAULT_TRAVEL_KM;

/// Store status that maps to [`LifecycleState::Locked`].
pub const LOCKED_STATUS: &str = "planned";
/// Estimated effort assumed when the store has none (hours).
pub const DEFAULT_ESTIMATED_HOURS: f64 = 2.0;

/// A task as delivered by the scheduling store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRecord {
    pub id: String,
    pub task_number: Option<String>,
    pub status: Option<String>,
    pub assigned_technician_id: Option<String>,
    #[serde(rename = "TechnicianId")]
    pub technician_id: Option<String>,
    #[serde(rename = "StartTime")]
    pub start_time: Option<String>,
    pub planned_date: Option<String>,
    pub estimated_time: Option<f64>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "_computedTravelToNextMin")]
    pub computed_travel_to_next_min: Option<u32>,
    #[serde(rename = "_travelToNextMin")]
    pub travel_to_next_min: Option<u32>,
    #[serde(rename = "_computedTravelKmToNext")]
    pub computed_travel_km_to_next: Option<f64>,
    #[serde(rename = "_travelToNextKm")]
    pub travel_to_next_km: Option<f64>,
    #[serde(rename = "_travelMetaToNext")]
    pub travel_meta_to_next: Option<HashMap<String, String>>,
}

impl TaskRecord {
    /// Converts the record into a job.
    pub fn into_job(self) -> Job {
        let resource_id = non_blank(self.assigned_technician_id.as_deref())
            .or_else(|| non_blank(self.technician_id.as_deref()))
            .map(str::to_string);

        let requested_start = non_blank(self.start_time.as_deref())
            .or_else(|| non_blank(self.planned_date.as_deref()))
            .and_then(parse_timestamp);

        let lifecycle = if self.status.as_deref() == Some(LOCKED_STATUS) {
            LifecycleState::Locked
        } else {
            LifecycleState::Draft
        };

        let travel_hint_to_next = self.travel_hint();
        let address = self.full_address();

        Job {
            id: self.id,
            resource_id,
            requested_start,
            visual_duration_hours: None,
            lifecycle,
            estimated_hours: Some(self.estimated_time.unwrap_or(DEFAULT_ESTIMATED_HOURS)),
            travel_hint_to_next,
            task_number: self.task_number,
            company_name: self.company_name,
            address,
            attributes: HashMap::new(),
        }
    }

    /// Street, postal code and city joined with ", ", skipping blanks.
    pub fn full_address(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.address, &self.postal_code, &self.city]
            .into_iter()
            .filter_map(|p| non_blank(p.as_deref()))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Travel hint from the enrichment keys; zero figures count as absent.
    /// Minutes without a distance get the default distance.
    fn travel_hint(&self) -> Option<TravelEstimate> {
        let minutes = [self.computed_travel_to_next_min, self.travel_to_next_min]
            .into_iter()
            .flatten()
            .find(|&m| m > 0)?;
        let km = [self.computed_travel_km_to_next, self.travel_to_next_km]
            .into_iter()
            .flatten()
            .find(|&k| k.is_finite() && k != 0.0)
            .unwrap_or(DEFAULT_TRAVEL_KM);
        Some(TravelEstimate {
            minutes,
            km,
            meta: self.travel_meta_to_next.clone().unwrap_or_default(),
        })
    }
}

impl From<TaskRecord> for Job {
    fn from(record: TaskRecord) -> Self {
        record.into_job()
    }
}

/// Parses an RFC 3339 timestamp; `None` on failure.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
