//! Pure timing logic library with no platform dependencies.
//! Testable on host with a manual clock and scheduler.

pub mod clock;
pub mod controller;
pub mod controls;
pub mod countdown;
pub mod error;
pub mod presenter;
pub mod scheduler;
pub mod stopwatch;

pub use clock::{Clock, ClockSample, ManualClock, MonotonicClock};
pub use controller::{Mode, ModeController, TimerSettings};
pub use countdown::{CountdownEngine, CountdownPhase, TickOutcome};
pub use error::TimerError;
pub use presenter::{Control, Presenter, StartStopLabel, Status};
pub use scheduler::{ManualScheduler, TickScheduler};
pub use stopwatch::StopwatchEngine;

/// Format milliseconds as "MM:SS.cc" (centiseconds). Minutes do not wrap at 60.
pub fn format_mm_ss_cc(ms: u64) -> String {
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let m = total_secs / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}.{:02}", m, s, cs)
}
