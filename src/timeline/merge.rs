//! Merge stage.
//!
//! Concatenates normalized jobs, synthesized travel and externally supplied
//! travel into one flat event list. External segments without a worker are
//! dropped. No deduplication or reconciliation happens here; overlap
//! between external and synthesized travel is detected separately by
//! [`find_travel_conflicts`] so the pipeline can apply its policy.

use serde::{Deserialize, Serialize};

use crate::models::{Event, NormalizedJob, TravelSegment};

/// Output of [`merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Merged {
    /// Jobs, then synthesized travel, then honored external travel.
    pub events: Vec<Event>,
    /// Ids of external segments dropped for lacking a worker.
    pub dropped_external: Vec<String>,
}

/// An external segment overlapping a synthesized one on the same worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelConflict {
    pub resource_id: String,
    pub external_id: String,
    pub synthesized_id: String,
}

/// Unions the three lists. Order across workers is not chronological.
pub fn merge(
    jobs: &[NormalizedJob],
    synthesized: &[TravelSegment],
    external: &[TravelSegment],
) -> Merged {
    let (honored, dropped): (Vec<&TravelSegment>, Vec<&TravelSegment>) =
        external.iter().partition(|t| t.assigned_resource().is_some());

    if !dropped.is_empty() {
        tracing::warn!(count = dropped.len(), "external travel without resource dropped");
    }

    let events = jobs
        .iter()
        .cloned()
        .map(Event::Job)
        .chain(synthesized.iter().cloned().map(Event::Travel))
        .chain(honored.into_iter().cloned().map(Event::Travel))
        .collect();

    Merged {
        events,
        dropped_external: dropped.into_iter().map(|t| t.id.clone()).collect(),
    }
}

/// Pairs of same-worker external and synthesized segments sharing time.
///
/// External segments without a worker are ignored, as in [`merge`].
pub fn find_travel_conflicts(
    synthesized: &[TravelSegment],
    external: &[TravelSegment],
) -> Vec<TravelConflict> {
    external
        .iter()
        .filter_map(|ext| ext.assigned_resource().map(|r| (r, ext)))
        .flat_map(move |(resource_id, ext)| {
            synthesized
                .iter()
                .filter(move |syn| {
                    syn.resource_id.as_deref() == Some(resource_id) && syn.overlaps(ext)
                })
                .map(move |syn| TravelConflict {
                    resource_id: resource_id.to_string(),
                    external_id: ext.id.clone(),
                    synthesized_id: syn.id.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

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

    fn seg(id: &str, resource: Option<&str>, from: DateTime<Utc>, to: DateTime<Utc>) -> TravelSegment {
        let mut s = TravelSegment::external(id, "T1", from, to, 1);
        s.resource_id = resource.map(str::to_string);
        s
    }

    #[test]
    fn test_merge_order_and_filter() {
        let jobs = vec![placed("J1", at(9, 0)), placed("J2", at(11, 15))];
        let synth = vec![seg("travel-J1-J2", Some("T1"), at(11, 0), at(11, 15))];
        let external = vec![
            seg("home-J1", Some("T1"), at(8, 30), at(9, 0)),
            seg("orphan", None, at(8, 0), at(8, 30)),
        ];

        let merged = merge(&jobs, &synth, &external);
        let ids: Vec<&str> = merged.events.iter().map(Event::id).collect();
        assert_eq!(ids, vec!["J1", "J2", "travel-J1-J2", "home-J1"]);
        assert_eq!(merged.dropped_external, vec!["orphan".to_string()]);
    }

    #[test]
    fn test_blank_resource_dropped() {
        let external = vec![
            seg("blank", Some(""), at(8, 0), at(8, 30)),
            seg("kept", Some("T1"), at(8, 30), at(9, 0)),
        ];
        let merged = merge(&[], &[], &external);
        let ids: Vec<&str> = merged.events.iter().map(Event::id).collect();
        assert_eq!(ids, vec!["kept"]);
        assert_eq!(merged.dropped_external, vec!["blank".to_string()]);

        let synth = vec![seg("travel-J1-J2", Some("T1"), at(8, 0), at(8, 30))];
        assert!(find_travel_conflicts(&synth, &external[..1]).is_empty());
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge(&[], &[], &[]);
        assert!(merged.events.is_empty());
        assert!(merged.dropped_external.is_empty());
    }

    #[test]
    fn test_conflicts_detected() {
        let synth = vec![seg("travel-J1-J2", Some("T1"), at(11, 0), at(11, 15))];
        let external = vec![
            seg("dup", Some("T1"), at(11, 5), at(11, 20)),
            seg("touching", Some("T1"), at(11, 15), at(11, 30)),
            seg("other", Some("T2"), at(11, 0), at(11, 15)),
            seg("orphan", None, at(11, 0), at(11, 15)),
        ];
        let conflicts = find_travel_conflicts(&synth, &external);
        assert_eq!(
            conflicts,
            vec![TravelConflict {
                resource_id: "T1".into(),
                external_id: "dup".into(),
                synthesized_id: "travel-J1-J2".into(),
            }]
        );
    }
}
