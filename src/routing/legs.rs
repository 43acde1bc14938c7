//! Home legs.
//!
//! The drive from a worker's home to the first job and from the last job
//! back home is not synthesized by the normalizer. It is built here from
//! the route table and handed to the merge stage as external travel.

use crate::models::{Resource, TravelSegment, TravelSource};
use crate::timeline::Timeline;

use super::RouteTable;

/// Identifier of the leg from home to `job_id`.
pub fn home_to_job_id(job_id: &str) -> String {
    format!("travel-home-{job_id}")
}

/// Identifier of the leg from `job_id` back home.
pub fn job_to_home_id(job_id: &str) -> String {
    format!("travel-{job_id}-home")
}

/// Builds the outbound and return legs for one worker-day.
///
/// The outbound leg ends exactly at the first job's start; the return leg
/// starts exactly at the last job's end. A leg is skipped when the worker
/// has no home address, the job has no address, or the route has not been
/// fetched yet.
pub fn home_legs(timeline: &Timeline, resource: &Resource, routes: &RouteTable) -> Vec<TravelSegment> {
    let mut legs = Vec::new();
    let Some(home) = resource.home_address.as_deref() else {
        return legs;
    };
    let (Some(first), Some(last)) = (timeline.jobs.first(), timeline.jobs.last()) else {
        return legs;
    };

    if let Some(addr) = first.job.address.as_deref() {
        match routes.lookup(home, addr) {
            Some(est) => legs.push(TravelSegment {
                id: home_to_job_id(first.id()),
                resource_id: Some(resource.id.clone()),
                start: first.start - est.duration(),
                end: first.start,
                duration_minutes: est.minutes,
                distance_km: est.rounded_km(),
                meta: est.meta.clone(),
                source: TravelSource::External,
            }),
            None => tracing::debug!(job = first.id(), "no route from home yet"),
        }
    }

    if let Some(addr) = last.job.address.as_deref() {
        match routes.lookup(addr, home) {
            Some(est) => legs.push(TravelSegment {
                id: job_to_home_id(last.id()),
                resource_id: Some(resource.id.clone()),
                start: last.end,
                end: last.end + est.duration(),
                duration_minutes: est.minutes,
                distance_km: est.rounded_km(),
                meta: est.meta.clone(),
                source: TravelSource::External,
            }),
            None => tracing::debug!(job = last.id(), "no route home yet"),
        }
    }

    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, NormalizedJob, TravelEstimate};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap()
    }

    fn placed(id: &str, address: &str, start: DateTime<Utc>) -> NormalizedJob {
        NormalizedJob {
            job: Job::new(id).assigned_to("T1").with_address(address),
            resource_id: "T1".into(),
            day: start.date_naive(),
            start,
            end: start + TimeDelta::hours(2),
        }
    }

    fn day() -> Timeline {
        Timeline {
            resource_id: "T1".into(),
            day: at(0, 0).date_naive(),
            jobs: vec![placed("J1", "A", at(9, 0)), placed("J2", "B", at(11, 15))],
            travel: Vec::new(),
        }
    }

    #[test]
    fn test_both_legs() {
        let routes = RouteTable::new()
            .with_route("H", "A", TravelEstimate::new(30, 22.4))
            .with_route("B", "H", TravelEstimate::new(45, 40.0));
        let tech = Resource::new("T1").with_home_address("H");

        let legs = home_legs(&day(), &tech, &routes);
        assert_eq!(legs.len(), 2);

        assert_eq!(legs[0].id, "travel-home-J1");
        assert_eq!(legs[0].start, at(8, 30));
        assert_eq!(legs[0].end, at(9, 0));
        assert_eq!(legs[0].distance_km, 22);
        assert_eq!(legs[0].resource_id.as_deref(), Some("T1"));

        assert_eq!(legs[1].id, "travel-J2-home");
        assert_eq!(legs[1].start, at(13, 15));
        assert_eq!(legs[1].end, at(14, 0));
        assert_eq!(legs[1].source, TravelSource::External);
    }

    #[test]
    fn test_missing_route_skipped() {
        let routes = RouteTable::new().with_route("H", "A", TravelEstimate::new(30, 22.0));
        let tech = Resource::new("T1").with_home_address("H");
        let legs = home_legs(&day(), &tech, &routes);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].id, home_to_job_id("J1"));
    }

    #[test]
    fn test_no_home_address() {
        let routes = RouteTable::new().with_route("H", "A", TravelEstimate::new(30, 22.0));
        assert!(home_legs(&day(), &Resource::new("T1"), &routes).is_empty());
    }
}
