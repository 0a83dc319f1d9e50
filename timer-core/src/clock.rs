//! Monotonic time sources.
//!
//! Engines never read a clock themselves: the controller samples one `Clock`
//! per command or tick and hands the `ClockSample` down.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds since an arbitrary, per-process epoch.
///
/// Only differences between samples carry meaning.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct ClockSample(u64);

impl ClockSample {
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_ms(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: ClockSample) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn offset(self, ms: u64) -> ClockSample {
        ClockSample(self.0.saturating_add(ms))
    }
}

pub trait Clock {
    fn now(&self) -> ClockSample;
}

/// Wall clock backed by `std::time::Instant`, epoch at construction.
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> ClockSample {
        ClockSample(self.epoch.elapsed().as_millis() as u64)
    }
}

/// A clock that only moves when told to. Clones share the same time, so a
/// test can keep one handle while the controller owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        // Samples never go backwards within a run.
        if ms >= self.now_ms.get() {
            self.now_ms.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> ClockSample {
        ClockSample(self.now_ms.get())
    }
}
