//! Time source for start-time coercion.
//!
//! The normalizer only consults the clock when a job arrives without a
//! usable requested start. Everything else is derived from the jobs' own
//! timestamps.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// A source of "now".
pub trait Clock: Send + Sync + Debug {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
