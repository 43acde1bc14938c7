//! Derived timeline entries.
//!
//! [`NormalizedJob`] is a job with its computed interval; [`Event`] is the
//! flat, renderable union of jobs and travel handed to the presentation
//! layer. Colors, CSS classes and labels are the renderer's business: the
//! core only exposes [`EventStatus`] and numeric fields.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{Job, LifecycleState, TravelSegment};

/// A job placed on a worker's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJob {
    /// The source job, unchanged.
    pub job: Job,
    /// Worker this placement belongs to.
    pub resource_id: String,
    /// Calendar day of the group the job was laid out in.
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NormalizedJob {
    /// Job identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.job.id
    }

    /// Block length (end - start).
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Same job shifted to start at `start`, keeping its block length.
    pub fn shifted_to(&self, start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: super::later_by(start, self.duration()),
            ..self.clone()
        }
    }
}

/// Presentation-neutral status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Locked,
    Travel,
}

/// One renderable interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Job(NormalizedJob),
    Travel(TravelSegment),
}

impl Event {
    pub fn id(&self) -> &str {
        match self {
            Event::Job(j) => j.id(),
            Event::Travel(t) => &t.id,
        }
    }

    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Event::Job(j) => Some(&j.resource_id),
            Event::Travel(t) => t.resource_id.as_deref(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        match self {
            Event::Job(j) => j.start,
            Event::Travel(t) => t.start,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        match self {
            Event::Job(j) => j.end,
            Event::Travel(t) => t.end,
        }
    }

    pub fn status(&self) -> EventStatus {
        match self {
            Event::Job(j) => match j.job.lifecycle {
                LifecycleState::Draft => EventStatus::Draft,
                LifecycleState::Locked => EventStatus::Locked,
            },
            Event::Travel(_) => EventStatus::Travel,
        }
    }

    /// Travel can't be dragged; jobs can be moved but never resized.
    pub fn is_read_only(&self) -> bool {
        match self {
            Event::Job(_) => false,
            Event::Travel(t) => t.is_read_only(),
        }
    }

    pub fn as_job(&self) -> Option<&NormalizedJob> {
        match self {
            Event::Job(j) => Some(j),
            Event::Travel(_) => None,
        }
    }

    pub fn as_travel(&self) -> Option<&TravelSegment> {
        match self {
            Event::Job(_) => None,
            Event::Travel(t) => Some(t),
        }
    }
}

impl From<NormalizedJob> for Event {
    fn from(job: NormalizedJob) -> Self {
        Event::Job(job)
    }
}

impl From<TravelSegment> for Event {
    fn from(segment: TravelSegment) -> Self {
        Event::Travel(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TravelEstimate, TravelSource};
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap()
    }

    fn placed(id: &str, locked: bool) -> NormalizedJob {
        let mut job = Job::new(id).assigned_to("T1");
        if locked {
            job = job.locked();
        }
        NormalizedJob {
            job,
            resource_id: "T1".into(),
            day: at(0, 0).date_naive(),
            start: at(9, 0),
            end: at(11, 0),
        }
    }

    #[test]
    fn test_shifted_keeps_duration() {
        let j = placed("J1", false).shifted_to(at(11, 15));
        assert_eq!(j.start, at(11, 15));
        assert_eq!(j.end, at(13, 15));
        assert_eq!(j.duration(), TimeDelta::hours(2));
    }

    #[test]
    fn test_event_accessors() {
        let job: Event = placed("J1", true).into();
        assert_eq!(job.id(), "J1");
        assert_eq!(job.resource_id(), Some("T1"));
        assert_eq!(job.status(), EventStatus::Locked);
        assert!(!job.is_read_only());
        assert!(job.as_job().is_some());

        let seg = TravelSegment::between(
            "J1",
            "J2",
            "T1",
            at(11, 0),
            &TravelEstimate::new(15, 1.0),
            TravelSource::Default,
        );
        let travel: Event = seg.into();
        assert_eq!(travel.status(), EventStatus::Travel);
        assert!(travel.is_read_only());
        assert_eq!(travel.end(), at(11, 15));
        assert!(travel.as_travel().is_some());
    }

    #[test]
    fn test_draft_status() {
        let e = Event::Job(placed("J1", false));
        assert_eq!(e.status(), EventStatus::Draft);
    }

    #[test]
    fn test_event_serde_tag() {
        let e = Event::Job(placed("J1", false));
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["kind"], "job");
        let back: Event = serde_json::from_value(v).unwrap();
        assert_eq!(back, e);
    }
}
