use std::fmt;

use crate::controller::Mode;
use crate::error::TimerError;
use crate::format_mm_ss_cc;

/// Something the user can press or type into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Control {
    StartStop,
    Reset,
    Lap,
    DurationInputs,
    Preset,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StartStopLabel {
    Start,
    Stop,
}

/// Short status line shown next to the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    NotSet,
    Configured { duration_ms: u64 },
    /// The countdown ran out on its own, as opposed to a manual stop.
    /// Shown again on every redisplay; the one-shot signal is
    /// `Presenter::render_completed`.
    Completed { duration_ms: u64 },
    Rejected(TimerError),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotSet => write!(f, "Not set"),
            Status::Configured { duration_ms } => write!(f, "Set: {}", format_mm_ss_cc(*duration_ms)),
            Status::Completed { duration_ms } => write!(f, "Done: {}", format_mm_ss_cc(*duration_ms)),
            Status::Rejected(TimerError::InvalidDuration | TimerError::NotConfigured) => {
                write!(f, "Set at least 1 second")
            }
            Status::Rejected(err) => write!(f, "{}", err),
        }
    }
}

/// Everything the core tells the outside world. Durations are raw
/// milliseconds; formatting belongs to the implementor.
pub trait Presenter {
    fn render(&mut self, ms: u64);
    fn render_status(&mut self, status: &Status);
    /// Fired once per countdown that reaches zero on a tick.
    fn render_completed(&mut self, configured_ms: u64);
    fn set_control_enabled(&mut self, control: Control, enabled: bool);
    /// Most recent first.
    fn render_laps(&mut self, laps: &[u64]);
    fn render_start_stop(&mut self, label: StartStopLabel);
    fn render_mode(&mut self, mode: Mode);
}
