use std::collections::HashMap;
use std::io::Write;

use timer_core::{format_mm_ss_cc, Control, Mode, Presenter, StartStopLabel, Status};

use crate::alerts::{fire_alert, AlertConfig};

const MAX_LAPS_SHOWN: usize = 10;

/// Line-oriented terminal display. The time readout is redrawn in place with
/// a carriage return; everything else goes on its own line.
pub struct TerminalPresenter<W: Write> {
    out: W,
    alerts: AlertConfig,
    mode: Mode,
    label: StartStopLabel,
    controls: HashMap<Control, bool>,
    // The cursor sits after an in-place readout.
    mid_line: bool,
    // Set while the user types on the line below a prompt.
    hold_readout: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, alerts: AlertConfig, mode: Mode) -> Self {
        Self {
            out,
            alerts,
            mode,
            label: StartStopLabel::Start,
            controls: HashMap::new(),
            mid_line: false,
            hold_readout: false,
        }
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        self.controls.get(&control).copied().unwrap_or(true)
    }

    /// Stop redrawing the readout in place, so typed input is not overwritten.
    /// Ticks still update the value; it reappears on the next render after release.
    pub fn hold_readout(&mut self, hold: bool) {
        self.hold_readout = hold;
    }

    pub fn show_help(&mut self, help: &str) {
        self.break_line();
        write!(self.out, "{}", help).ok();
        self.out.flush().ok();
    }

    pub fn show_prompt(&mut self, prompt: &str) {
        self.break_line();
        writeln!(self.out, "{}", prompt).ok();
        self.out.flush().ok();
    }

    fn break_line(&mut self) {
        if self.mid_line {
            writeln!(self.out).ok();
            self.mid_line = false;
        }
    }

    fn mode_tag(&self) -> &'static str {
        match self.mode {
            Mode::Stopwatch => "SW",
            Mode::Countdown => "CD",
        }
    }

    fn label_text(&self) -> &'static str {
        match self.label {
            StartStopLabel::Start => "Start",
            StartStopLabel::Stop => "Stop",
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, ms: u64) {
        if self.hold_readout {
            return;
        }
        write!(
            self.out,
            "\r[{}] {}  ({})   ",
            self.mode_tag(),
            format_mm_ss_cc(ms),
            self.label_text()
        )
        .ok();
        self.out.flush().ok();
        self.mid_line = true;
    }

    fn render_status(&mut self, status: &Status) {
        self.break_line();
        writeln!(self.out, "  {}", status).ok();
        self.out.flush().ok();
    }

    fn render_completed(&mut self, configured_ms: u64) {
        self.break_line();
        let message = format!("Time's up: {}", format_mm_ss_cc(configured_ms));
        fire_alert(&self.alerts, &mut self.out, &message);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        if self.controls.insert(control, enabled) != Some(enabled) {
            log::trace!("{:?} enabled={}", control, enabled);
        }
    }

    fn render_laps(&mut self, laps: &[u64]) {
        self.break_line();
        if laps.is_empty() {
            writeln!(self.out, "  (no laps)").ok();
        }
        for (i, lap) in laps.iter().take(MAX_LAPS_SHOWN).enumerate() {
            writeln!(self.out, "  Lap {:>2}  {}", laps.len() - i, format_mm_ss_cc(*lap)).ok();
        }
        if laps.len() > MAX_LAPS_SHOWN {
            writeln!(self.out, "  ... {} more", laps.len() - MAX_LAPS_SHOWN).ok();
        }
        self.out.flush().ok();
    }

    fn render_start_stop(&mut self, label: StartStopLabel) {
        self.label = label;
    }

    fn render_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.break_line();
        let title = match mode {
            Mode::Stopwatch => "Stopwatch",
            Mode::Countdown => "Countdown",
        };
        writeln!(self.out, "== {} ==", title).ok();
        self.out.flush().ok();
    }
}
