//! Sources of "now" for the engine.
//!
//! Birth moments and timer deadlines are naive local date-times at
//! millisecond resolution. No timezone arithmetic is performed.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Drop sub-millisecond precision.
pub fn truncate_to_millis(t: NaiveDateTime) -> NaiveDateTime {
    let nanos = t.nanosecond() / 1_000_000 * 1_000_000;
    t.with_nanosecond(nanos).unwrap_or(t)
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_millis(Local::now().naive_local())
    }
}

/// Wall time anchored once, then advanced by tokio's monotonic clock.
///
/// Immune to wall-clock jumps while the engine runs, and follows tokio's
/// paused time in tests.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor: NaiveDateTime,
    origin: tokio::time::Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::anchored_at(SystemClock.now())
    }

    pub fn anchored_at(anchor: NaiveDateTime) -> Self {
        Self {
            anchor,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = TimeDelta::from_std(self.origin.elapsed()).unwrap_or(TimeDelta::MAX);
        truncate_to_millis(
            self.anchor
                .checked_add_signed(elapsed)
                .unwrap_or(NaiveDateTime::MAX),
        )
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.advance(TimeDelta::milliseconds(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
