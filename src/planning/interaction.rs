//! Calendar interaction handling.
//!
//! Jobs may be dragged to a new start; the move is forwarded to the sink,
//! which persists it and triggers a fresh normalization pass. Travel
//! segments are read-only and ignore drags. Resizing is never allowed:
//! block length is fixed by configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Event;

/// A user gesture on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    /// An event was dropped at a new start.
    DragCompleted {
        event_id: String,
        new_start: DateTime<Utc>,
    },
    /// The user tried to resize an event.
    ResizeAttempted { event_id: String },
}

/// A job move to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMoved {
    pub job_id: String,
    pub resource_id: String,
    /// Start shown before the drag.
    pub previous_start: DateTime<Utc>,
    pub new_start: DateTime<Utc>,
}

/// Why an action had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The event is travel and cannot be moved.
    ReadOnly,
    /// No event with that id is on the calendar.
    UnknownEvent,
}

/// What [`handle_action`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Moved(JobMoved),
    Ignored {
        event_id: String,
        reason: IgnoreReason,
    },
    ResizeRejected {
        event_id: String,
    },
}

/// Receives the effects of user actions.
pub trait InteractionSink {
    /// A job was dragged to `new_start`.
    fn on_job_moved(&mut self, job_id: &str, new_start: DateTime<Utc>);

    /// A resize was cancelled.
    fn on_resize_rejected(&mut self, _event_id: &str) {}
}

/// Applies one user action against the rendered events.
pub fn handle_action<S>(events: &[Event], action: &UserAction, sink: &mut S) -> ActionOutcome
where
    S: InteractionSink + ?Sized,
{
    match action {
        UserAction::DragCompleted {
            event_id,
            new_start,
        } => {
            let Some(event) = events.iter().find(|e| e.id() == event_id.as_str()) else {
                tracing::debug!(event = %event_id, "drag on unknown event ignored");
                return ActionOutcome::Ignored {
                    event_id: event_id.clone(),
                    reason: IgnoreReason::UnknownEvent,
                };
            };
            match event.as_job() {
                Some(job) if !event.is_read_only() => {
                    sink.on_job_moved(job.id(), *new_start);
                    ActionOutcome::Moved(JobMoved {
                        job_id: job.id().to_string(),
                        resource_id: job.resource_id.clone(),
                        previous_start: job.start,
                        new_start: *new_start,
                    })
                }
                _ => ActionOutcome::Ignored {
                    event_id: event_id.clone(),
                    reason: IgnoreReason::ReadOnly,
                },
            }
        }
        UserAction::ResizeAttempted { event_id } => {
            sink.on_resize_rejected(event_id);
            ActionOutcome::ResizeRejected {
                event_id: event_id.clone(),
            }
        }
    }
}
