//! Timeline builder: groups jobs per worker and calendar day.
//!
//! # Algorithm
//! 1. Drop jobs without a worker (reported as [`ExclusionReason::Unassigned`]).
//! 2. Resolve each start: the requested one, else the clock's "now" (or an
//!    exclusion, depending on [`MissingStartPolicy`]).
//! 3. Key by `(resource_id, calendar day of the start)` in the configured
//!    offset.
//! 4. Sort each group by start, ties broken by job id.
//!
//! Groups live in a `BTreeMap` so iteration order, and everything derived
//! from it, is deterministic.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clock::Clock;
use crate::config::MissingStartPolicy;
use crate::models::Job;

/// One worker-day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub resource_id: String,
    pub day: NaiveDate,
}

/// A job with its resolved start, ready for the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedJob {
    pub job: Job,
    pub requested_start: DateTime<Utc>,
    /// The job had no usable start and `requested_start` is the clock's.
    pub start_coerced: bool,
}

/// Why a job is absent from every timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No worker assigned.
    Unassigned,
    /// No usable start and the policy excludes such jobs.
    MissingStart,
}

/// A job left out of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub job_id: String,
    pub reason: ExclusionReason,
}

/// Output of [`build`].
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: BTreeMap<GroupKey, Vec<SortedJob>>,
    /// Jobs in input order that were filtered out.
    pub excluded: Vec<Exclusion>,
}

impl Grouping {
    /// Ids of jobs whose start was coerced to "now", in group order.
    pub fn coerced_starts(&self) -> Vec<String> {
        self.groups
            .values()
            .flatten()
            .filter(|s| s.start_coerced)
            .map(|s| s.job.id.clone())
            .collect()
    }

    /// Number of grouped jobs.
    pub fn job_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Calendar day of `t` in `offset`.
pub fn calendar_day(t: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    t.with_timezone(&offset).date_naive()
}

/// Groups and sorts `jobs`. The input is not modified.
///
/// The clock is read at most once per call, so every coerced job in a pass
/// shares the same instant.
pub fn build(
    jobs: &[Job],
    missing_start: MissingStartPolicy,
    offset: FixedOffset,
    clock: &dyn Clock,
) -> Grouping {
    let mut grouping = Grouping::default();
    let mut now: Option<DateTime<Utc>> = None;

    for job in jobs {
        let Some(resource_id) = job.assigned_resource() else {
            grouping.excluded.push(Exclusion {
                job_id: job.id.clone(),
                reason: ExclusionReason::Unassigned,
            });
            continue;
        };

        let (requested_start, start_coerced) = match (job.requested_start, missing_start) {
            (Some(start), _) => (start, false),
            (None, MissingStartPolicy::Now) => (*now.get_or_insert_with(|| clock.now()), true),
            (None, MissingStartPolicy::Exclude) => {
                grouping.excluded.push(Exclusion {
                    job_id: job.id.clone(),
                    reason: ExclusionReason::MissingStart,
                });
                continue;
            }
        };

        let key = GroupKey {
            resource_id: resource_id.to_string(),
            day: calendar_day(requested_start, offset),
        };
        grouping.groups.entry(key).or_default().push(SortedJob {
            job: job.clone(),
            requested_start,
            start_coerced,
        });
    }

    for entries in grouping.groups.values_mut() {
        entries.sort_by(|a, b| {
            a.requested_start
                .cmp(&b.requested_start)
                .then_with(|| a.job.id.cmp(&b.job.id))
        });
    }

    if !grouping.excluded.is_empty() {
        tracing::warn!(
            count = grouping.excluded.len(),
            "jobs excluded from timelines"
        );
    }
    tracing::debug!(
        groups = grouping.groups.len(),
        jobs = grouping.job_count(),
        "grouped jobs"
    );

    grouping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(at(10, 12, 34))
    }

    fn ids(entries: &[SortedJob]) -> Vec<&str> {
        entries.iter().map(|s| s.job.id.as_str()).collect()
    }

    #[test]
    fn test_groups_by_resource_and_day() {
        let jobs = vec![
            Job::new("J1").assigned_to("T1").starting_at(at(4, 9, 0)),
            Job::new("J2").assigned_to("T1").starting_at(at(5, 9, 0)),
            Job::new("J3").assigned_to("T2").starting_at(at(4, 9, 0)),
            Job::new("J4").assigned_to("T1").starting_at(at(4, 14, 0)),
        ];
        let g = build(&jobs, MissingStartPolicy::Now, utc(), &clock());

        assert_eq!(g.groups.len(), 3);
        let key = GroupKey {
            resource_id: "T1".into(),
            day: at(4, 0, 0).date_naive(),
        };
        assert_eq!(ids(&g.groups[&key]), vec!["J1", "J4"]);
        assert!(g.excluded.is_empty());
        assert_eq!(g.job_count(), 4);
    }

    #[test]
    fn test_sort_by_start_then_id() {
        let jobs = vec![
            Job::new("b").assigned_to("T1").starting_at(at(4, 9, 0)),
            Job::new("c").assigned_to("T1").starting_at(at(4, 8, 0)),
            Job::new("a").assigned_to("T1").starting_at(at(4, 9, 0)),
        ];
        let g = build(&jobs, MissingStartPolicy::Now, utc(), &clock());
        let entries = g.groups.values().next().unwrap();
        assert_eq!(ids(entries), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unassigned_excluded() {
        let jobs = vec![
            Job::new("J1").starting_at(at(4, 9, 0)),
            Job::new("J2").assigned_to("T1").starting_at(at(4, 9, 0)),
        ];
        let g = build(&jobs, MissingStartPolicy::Now, utc(), &clock());
        assert_eq!(g.job_count(), 1);
        assert_eq!(
            g.excluded,
            vec![Exclusion {
                job_id: "J1".into(),
                reason: ExclusionReason::Unassigned
            }]
        );
    }

    #[test]
    fn test_blank_resource_excluded() {
        let jobs = vec![
            Job::new("J1").assigned_to("").starting_at(at(4, 9, 0)),
            Job::new("J2").assigned_to(" ").starting_at(at(4, 9, 0)),
        ];
        let g = build(&jobs, MissingStartPolicy::Now, utc(), &clock());
        assert!(g.groups.is_empty());
        assert!(g
            .excluded
            .iter()
            .all(|e| e.reason == ExclusionReason::Unassigned));
        assert_eq!(g.excluded.len(), 2);
    }

    #[test]
    fn test_missing_start_coerced_to_now() {
        let jobs = vec![
            Job::new("J1").assigned_to("T1"),
            Job::new("J2").assigned_to("T1"),
        ];
        let g = build(&jobs, MissingStartPolicy::Now, utc(), &clock());
        let entries = g.groups.values().next().unwrap();
        assert!(entries.iter().all(|e| e.requested_start == at(10, 12, 34)));
        assert_eq!(g.coerced_starts(), vec!["J1".to_string(), "J2".to_string()]);
    }

    #[test]
    fn test_missing_start_excluded() {
        let jobs = vec![Job::new("J1").assigned_to("T1")];
        let g = build(&jobs, MissingStartPolicy::Exclude, utc(), &clock());
        assert!(g.groups.is_empty());
        assert_eq!(g.excluded[0].reason, ExclusionReason::MissingStart);
    }

    #[test]
    fn test_day_uses_offset() {
        // 23:30 UTC is already the next day at UTC+1.
        let jobs = vec![Job::new("J1").assigned_to("T1").starting_at(at(4, 23, 30))];
        let cet = FixedOffset::east_opt(3600).unwrap();
        let g = build(&jobs, MissingStartPolicy::Now, cet, &clock());
        let key = g.groups.keys().next().unwrap();
        assert_eq!(key.day, at(5, 0, 0).date_naive());
    }

    #[test]
    fn test_input_untouched() {
        let jobs = vec![
            Job::new("J2").assigned_to("T1").starting_at(at(4, 10, 0)),
            Job::new("J1").assigned_to("T1").starting_at(at(4, 9, 0)),
        ];
        let before = jobs.clone();
        let _ = build(&jobs, MissingStartPolicy::Now, utc(), &clock());
        assert_eq!(jobs, before);
    }
}
