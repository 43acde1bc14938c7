//! Travel segment synthesizer.
//!
//! Walks a cascaded worker-day once, left to right. For each consecutive
//! pair it resolves travel figures, places a segment at the leaving job's
//! end, and moves the arriving job to the segment's end. Job order is
//! never changed, whatever the shift.

use crate::config::GapPolicy;
use crate::models::{NormalizedJob, TravelSegment};
use crate::routing::TravelResolver;

/// Inserts travel between consecutive jobs of one worker-day.
///
/// Returns the re-cascaded jobs and the synthesized segments
/// (`jobs.len() - 1` of them). The input slice is not modified.
///
/// With [`GapPolicy::Close`] each arriving job starts exactly when the
/// preceding travel ends. With [`GapPolicy::Preserve`] it is only pushed
/// forward when it would otherwise start before that point.
pub fn insert_travel(
    jobs: &[NormalizedJob],
    resolver: &TravelResolver<'_>,
    gap_policy: GapPolicy,
) -> (Vec<NormalizedJob>, Vec<TravelSegment>) {
    let capacity = jobs.len().saturating_sub(1);
    jobs.iter().fold(
        (Vec::with_capacity(jobs.len()), Vec::with_capacity(capacity)),
        |(mut placed, mut travel), next| {
            let Some(prev) = placed.last() else {
                placed.push(next.clone());
                return (placed, travel);
            };

            let (estimate, source) = resolver.resolve(prev, next);
            let segment = TravelSegment::between(
                prev.id(),
                next.id(),
                prev.resource_id.clone(),
                prev.end,
                &estimate,
                source,
            );
            let start = match gap_policy {
                GapPolicy::Close => segment.end,
                GapPolicy::Preserve => next.start.max(segment.end),
            };

            let arriving = next.shifted_to(start);
            travel.push(segment);
            placed.push(arriving);
            (placed, travel)
        },
    )
}
