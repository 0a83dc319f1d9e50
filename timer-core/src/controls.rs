//! Which controls are usable in which state, one table per mode.

use crate::controller::Mode;
use crate::presenter::Control;

/// The slice of engine state the enablement rules look at.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineView {
    pub running: bool,
    /// Elapsed for the stopwatch, remaining for the countdown.
    pub value_ms: u64,
    /// Always zero for the stopwatch.
    pub configured_ms: u64,
}

pub type Predicate = fn(&EngineView) -> bool;

fn always(_: &EngineView) -> bool {
    true
}

fn never(_: &EngineView) -> bool {
    false
}

fn running(v: &EngineView) -> bool {
    v.running
}

fn stopped(v: &EngineView) -> bool {
    !v.running
}

fn stopped_with_elapsed(v: &EngineView) -> bool {
    !v.running && v.value_ms > 0
}

fn stopped_with_duration(v: &EngineView) -> bool {
    !v.running && v.configured_ms > 0
}

static STOPWATCH: [(Control, Predicate); 5] = [
    (Control::StartStop, always),
    (Control::Reset, stopped_with_elapsed),
    (Control::Lap, running),
    (Control::DurationInputs, always),
    (Control::Preset, always),
];

static COUNTDOWN: [(Control, Predicate); 5] = [
    // Left enabled when nothing is set so a press can explain why it fails.
    (Control::StartStop, always),
    (Control::Reset, stopped_with_duration),
    (Control::Lap, never),
    (Control::DurationInputs, stopped),
    (Control::Preset, stopped),
];

pub fn capabilities(mode: Mode) -> &'static [(Control, Predicate)] {
    match mode {
        Mode::Stopwatch => &STOPWATCH,
        Mode::Countdown => &COUNTDOWN,
    }
}

pub fn evaluate(mode: Mode, view: &EngineView) -> impl Iterator<Item = (Control, bool)> + '_ {
    capabilities(mode)
        .iter()
        .map(move |(control, enabled)| (*control, enabled(view)))
}
