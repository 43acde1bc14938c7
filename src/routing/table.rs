//! Address-keyed route cache.
//!
//! The distance provider is consulted ahead of time by an enrichment step;
//! its answers land in a [`RouteTable`] keyed by `(origin, destination)`.
//! The table then serves as a [`TravelEstimator`] for the normalizer and as
//! the data source for home legs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::TravelEstimator;
use crate::error::EstimateError;
use crate::models::{NormalizedJob, TravelEstimate};
use crate::timeline::Timeline;

/// One origin/destination pair the enrichment step should fetch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
}

impl RouteRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Cached travel figures per address pair.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<(String, String), TravelEstimate>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a route, replacing any previous figures.
    pub fn insert(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        estimate: TravelEstimate,
    ) {
        self.routes
            .insert((origin.into(), destination.into()), estimate);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_route(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        estimate: TravelEstimate,
    ) -> Self {
        self.insert(origin, destination, estimate);
        self
    }

    /// Figures for a pair, if fetched.
    pub fn lookup(&self, origin: &str, destination: &str) -> Option<&TravelEstimate> {
        self.routes
            .get(&(origin.to_string(), destination.to_string()))
    }

    pub fn contains(&self, request: &RouteRequest) -> bool {
        self.lookup(&request.origin, &request.destination).is_some()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Requests from `requests` that the table cannot answer yet.
    pub fn missing<'r>(&self, requests: &'r [RouteRequest]) -> Vec<&'r RouteRequest> {
        requests.iter().filter(|r| !self.contains(r)).collect()
    }
}

impl TravelEstimator for RouteTable {
    fn estimate(
        &self,
        from: &NormalizedJob,
        to: &NormalizedJob,
    ) -> Result<Option<TravelEstimate>, EstimateError> {
        let (Some(origin), Some(destination)) = (from.job.address.as_deref(), to.job.address.as_deref())
        else {
            return Ok(None);
        };
        self.lookup(origin, destination)
            .cloned()
            .map(Some)
            .ok_or_else(|| EstimateError::Unavailable {
                from: origin.to_string(),
                to: destination.to_string(),
            })
    }
}

/// Address pairs needed to draw a day: home to the first job, each
/// consecutive pair, and the last job back home.
///
/// Jobs without an address are skipped; the result is deduplicated and
/// sorted.
pub fn route_requests(timelines: &[Timeline], home: Option<&str>) -> Vec<RouteRequest> {
    let mut requests = BTreeSet::new();
    for timeline in timelines {
        let addresses: Vec<&str> = timeline
            .jobs
            .iter()
            .filter_map(|j| j.job.address.as_deref())
            .collect();
        let (Some(first), Some(last)) = (addresses.first(), addresses.last()) else {
            continue;
        };
        if let Some(home) = home {
            requests.insert(RouteRequest::new(home, *first));
            requests.insert(RouteRequest::new(*last, home));
        }
        for pair in addresses.windows(2) {
            requests.insert(RouteRequest::new(pair[0], pair[1]));
        }
    }
    requests.into_iter().collect()
}
