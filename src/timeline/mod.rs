//! Per-worker daily timelines.
//!
//! The four stages of a normalization pass, leaf-first:
//!
//! - **`builder`**: group jobs by `(worker, calendar day)` and sort them
//! - **`cascade`**: snap to the hour, apply the visual block length, and
//!   push overlapping jobs forward
//! - **`travel`**: insert a travel segment between consecutive jobs and
//!   re-cascade
//! - **`merge`**: union jobs, synthesized and external travel into one list
//!
//! Every stage is a pure function of its inputs. The pipeline that strings
//! them together lives in [`crate::normalizer`].

mod builder;
mod cascade;
mod merge;
mod travel;

pub use builder::{build, calendar_day, Exclusion, ExclusionReason, GroupKey, Grouping, SortedJob};
pub use cascade::{normalize, snap_to_hour};
pub use merge::{find_travel_conflicts, merge, Merged, TravelConflict};
pub use travel::insert_travel;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Event, NormalizedJob, TravelSegment};

/// One worker's day after normalization.
///
/// `travel[i]` sits between `jobs[i]` and `jobs[i + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub resource_id: String,
    pub day: NaiveDate,
    pub jobs: Vec<NormalizedJob>,
    pub travel: Vec<TravelSegment>,
}

impl Timeline {
    /// The group this timeline was built from.
    pub fn key(&self) -> GroupKey {
        GroupKey {
            resource_id: self.resource_id.clone(),
            day: self.day,
        }
    }

    /// Start of the first job.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.jobs.first().map(|j| j.start)
    }

    /// End of the last job.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.jobs.last().map(|j| j.end)
    }

    /// Jobs and travel interleaved: job, travel, job, ...
    pub fn events(&self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.jobs.len() + self.travel.len());
        let mut travel = self.travel.iter();
        for job in &self.jobs {
            events.push(Event::Job(job.clone()));
            if let Some(segment) = travel.next() {
                events.push(Event::Travel(segment.clone()));
            }
        }
        events
    }

    /// Whether consecutive entries abut exactly (no gap, no overlap).
    pub fn is_contiguous(&self) -> bool {
        self.events()
            .windows(2)
            .all(|pair| pair[0].end() == pair[1].start())
    }

    /// Whether entries are strictly ordered and never overlap.
    pub fn is_non_overlapping(&self) -> bool {
        self.events()
            .windows(2)
            .all(|pair| pair[0].start() < pair[0].end() && pair[0].end() <= pair[1].start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, TravelEstimate, TravelSource};
    use chrono::{TimeDelta, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap()
    }

    fn placed(id: &str, start: DateTime<Utc>) -> NormalizedJob {
        NormalizedJob {
            job: Job::new(id).assigned_to("T1"),
            resource_id: "T1".into(),
            day: start.date_naive(),
            start,
            end: start + TimeDelta::hours(2),
        }
    }

    fn sample() -> Timeline {
        Timeline {
            resource_id: "T1".into(),
            day: at(0, 0).date_naive(),
            jobs: vec![placed("J1", at(9, 0)), placed("J2", at(11, 15))],
            travel: vec![TravelSegment::between(
                "J1",
                "J2",
                "T1",
                at(11, 0),
                &TravelEstimate::new(15, 1.0),
                TravelSource::Default,
            )],
        }
    }

    #[test]
    fn test_events_interleaved() {
        let ids: Vec<String> = sample().events().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(ids, vec!["J1", "travel-J1-J2", "J2"]);
    }

    #[test]
    fn test_bounds_and_key() {
        let tl = sample();
        assert_eq!(tl.start(), Some(at(9, 0)));
        assert_eq!(tl.end(), Some(at(13, 15)));
        assert_eq!(tl.key().resource_id, "T1");
    }

    #[test]
    fn test_contiguity_checks() {
        let tl = sample();
        assert!(tl.is_contiguous());
        assert!(tl.is_non_overlapping());

        let mut gap = sample();
        gap.jobs[1] = gap.jobs[1].shifted_to(at(14, 0));
        assert!(!gap.is_contiguous());
        assert!(gap.is_non_overlapping());

        let mut overlap = sample();
        overlap.jobs[1] = overlap.jobs[1].shifted_to(at(11, 5));
        assert!(!overlap.is_non_overlapping());
    }
}
