//! Timeline domain models.
//!
//! Input types come from outside the normalizer ([`Job`], [`Resource`],
//! externally built [`TravelSegment`]s, store [`TaskRecord`]s); derived
//! types are recomputed on every pass ([`NormalizedJob`], synthesized
//! [`TravelSegment`]s, [`Event`]).
//!
//! # Domain Mappings
//!
//! | crew-timeline | Field service | Portal calendar |
//! |---------------|---------------|-----------------|
//! | Job | Work order | Task card |
//! | Resource | Technician | Calendar row |
//! | TravelSegment | Drive | Travel block |
//! | Event | Calendar entry | Rendered block |

mod event;
mod intake;
mod job;
mod resource;
mod travel;

pub use event::{Event, EventStatus, NormalizedJob};
pub use intake::{parse_timestamp, TaskRecord};
pub use job::{Job, LifecycleState};
pub use resource::{Lane, Resource, ResourceRegistry};
pub use travel::{TravelEstimate, TravelSegment, TravelSource};

use chrono::{DateTime, TimeDelta, Utc};

/// `t + d`, saturating at the latest representable instant.
pub(crate) fn later_by(t: DateTime<Utc>, d: TimeDelta) -> DateTime<Utc> {
    t.checked_add_signed(d).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
