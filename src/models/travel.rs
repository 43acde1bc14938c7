//! Travel models.
//!
//! A [`TravelEstimate`] is what an enrichment step or estimator reports for a
//! pair of sites. A [`TravelSegment`] is the read-only interval placed on a
//! worker's timeline between two jobs (or before the first / after the last
//! job, when supplied externally).

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Travel time and distance between two sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    /// Driving time (minutes).
    pub minutes: u32,
    /// Driving distance (km, unrounded).
    pub km: f64,
    /// Provider metadata (route summary, resolved addresses, ...).
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

impl TravelEstimate {
    /// Creates an estimate without metadata.
    pub fn new(minutes: u32, km: f64) -> Self {
        Self {
            minutes,
            km,
            meta: HashMap::new(),
        }
    }

    /// Converts a routing provider's raw figures (meters, seconds).
    pub fn from_route(meters: u64, seconds: u64) -> Self {
        let km = (meters as f64 / 1000.0).round();
        let minutes = (seconds as f64 / 60.0).round() as u32;
        Self::new(minutes, km)
    }

    /// Adds a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Whether this estimate can size a segment. Zero-minute figures count
    /// as missing data.
    pub fn is_usable(&self) -> bool {
        self.minutes > 0
    }

    /// Travel time as a duration.
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes))
    }

    /// Whole kilometres: rounded, never negative, 0 for non-finite input.
    pub fn rounded_km(&self) -> u32 {
        if self.km.is_finite() {
            self.km.round().max(0.0) as u32
        } else {
            0
        }
    }
}

/// Where a travel segment's figures came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelSource {
    /// The leaving job's pre-computed hint.
    Hint,
    /// The injected estimator.
    Estimator,
    /// The configured fallback.
    Default,
    /// Built outside the normalizer (e.g. home legs).
    #[default]
    External,
}

/// A read-only transit interval on a worker's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSegment {
    /// Deterministic identifier.
    pub id: String,
    /// Worker. Externally supplied segments without one are dropped.
    pub resource_id: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: u32,
    /// Rounded distance (km).
    pub distance_km: u32,
    #[serde(default)]
    pub meta: HashMap<String, String>,
    #[serde(default)]
    pub source: TravelSource,
}

impl TravelSegment {
    /// Builds the segment between two consecutive jobs.
    pub fn between(
        from_id: &str,
        to_id: &str,
        resource_id: impl Into<String>,
        start: DateTime<Utc>,
        estimate: &TravelEstimate,
        source: TravelSource,
    ) -> Self {
        Self {
            id: Self::pair_id(from_id, to_id),
            resource_id: Some(resource_id.into()),
            start,
            end: super::later_by(start, estimate.duration()),
            duration_minutes: estimate.minutes,
            distance_km: estimate.rounded_km(),
            meta: estimate.meta.clone(),
            source,
        }
    }

    /// Creates an external segment spanning `[start, end)`.
    pub fn external(
        id: impl Into<String>,
        resource_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        distance_km: u32,
    ) -> Self {
        let minutes = (end - start).num_minutes().max(0);
        Self {
            id: id.into(),
            resource_id: Some(resource_id.into()),
            start,
            end,
            duration_minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
            distance_km,
            meta: HashMap::new(),
            source: TravelSource::External,
        }
    }

    /// Identifier for the segment from `from_id` to `to_id`.
    pub fn pair_id(from_id: &str, to_id: &str) -> String {
        format!("travel-{from_id}-{to_id}")
    }

    /// The worker, treating a blank id as none.
    pub fn assigned_resource(&self) -> Option<&str> {
        self.resource_id.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Travel segments can never be moved or resized.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        true
    }

    /// Whether two segments share any time (touching ends do not count).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap()
    }

    #[test]
    fn test_from_route() {
        let e = TravelEstimate::from_route(29_600, 2_390);
        assert_eq!(e.minutes, 40);
        assert!((e.km - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_usable_and_rounding() {
        assert!(!TravelEstimate::new(0, 3.0).is_usable());
        assert!(TravelEstimate::new(1, 0.0).is_usable());
        assert_eq!(TravelEstimate::new(10, 2.5).rounded_km(), 3);
        assert_eq!(TravelEstimate::new(10, -4.0).rounded_km(), 0);
        assert_eq!(TravelEstimate::new(10, f64::INFINITY).rounded_km(), 0);
    }

    #[test]
    fn test_segment_between() {
        let est = TravelEstimate::new(40, 29.6).with_meta("summary", "E20");
        let seg = TravelSegment::between("J1", "J2", "T1", at(11, 0), &est, TravelSource::Hint);
        assert_eq!(seg.id, "travel-J1-J2");
        assert_eq!(seg.resource_id.as_deref(), Some("T1"));
        assert_eq!(seg.end, at(11, 40));
        assert_eq!(seg.duration_minutes, 40);
        assert_eq!(seg.distance_km, 30);
        assert_eq!(seg.meta.get("summary").map(String::as_str), Some("E20"));
        assert!(seg.is_read_only());
    }

    #[test]
    fn test_segment_overlap() {
        let a = TravelSegment::external("a", "T1", at(8, 0), at(9, 0), 5);
        let b = TravelSegment::external("b", "T1", at(8, 30), at(9, 30), 5);
        let c = TravelSegment::external("c", "T1", at(9, 0), at(9, 15), 5);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.duration_minutes, 60);
    }

    #[test]
    fn test_external_source_default() {
        let json = r#"{
            "id": "home-J1",
            "resource_id": "T1",
            "start": "2024-03-04T08:30:00Z",
            "end": "2024-03-04T09:00:00Z",
            "duration_minutes": 30,
            "distance_km": 22
        }"#;
        let seg: TravelSegment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.source, TravelSource::External);
        assert!(seg.meta.is_empty());
    }
}
