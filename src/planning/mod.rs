//! Planning-board helpers.
//!
//! - **`slots`**: where a job dropped onto a day lands
//! - **`interaction`**: drag and resize gestures on rendered events

mod interaction;
mod slots;

pub use interaction::{handle_action, ActionOutcome, IgnoreReason, InteractionSink, JobMoved, UserAction};
pub use slots::{next_free_slot, slot_at_row};
