use crate::clock::{Clock, ClockSample};
use crate::controls::{self, EngineView};
use crate::countdown::{CountdownEngine, CountdownPhase, TickOutcome};
use crate::error::TimerError;
use crate::presenter::{Presenter, StartStopLabel, Status};
use crate::scheduler::TickScheduler;
use crate::stopwatch::StopwatchEngine;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Stopwatch,
    Countdown,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerSettings {
    pub stopwatch_tick_ms: u64,
    pub countdown_tick_ms: u64,
    pub preset_ms: u64,
    pub initial_mode: Mode,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            stopwatch_tick_ms: 50,
            countdown_tick_ms: 50,
            preset_ms: 5 * 60 * 1000,
            initial_mode: Mode::Countdown,
        }
    }
}

/// Owns both engines and routes every command and tick to the active one.
///
/// Switching modes always stops the active engine first, so at most one
/// engine runs and at most one tick cadence exists.
pub struct ModeController<C: Clock, S: TickScheduler, P: Presenter> {
    clock: C,
    scheduler: S,
    presenter: P,
    settings: TimerSettings,
    mode: Mode,
    stopwatch: StopwatchEngine,
    countdown: CountdownEngine,
}

impl<C: Clock, S: TickScheduler, P: Presenter> ModeController<C, S, P> {
    pub fn new(clock: C, scheduler: S, presenter: P, settings: TimerSettings) -> Self {
        Self {
            clock,
            scheduler,
            presenter,
            settings,
            mode: settings.initial_mode,
            stopwatch: StopwatchEngine::new(),
            countdown: CountdownEngine::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn stopwatch(&self) -> &StopwatchEngine {
        &self.stopwatch
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn is_running(&self) -> bool {
        match self.mode {
            Mode::Stopwatch => self.stopwatch.is_running(),
            Mode::Countdown => self.countdown.is_running(),
        }
    }

    /// Full redisplay of the active mode.
    pub fn refresh(&mut self) {
        self.presenter.render_mode(self.mode);
        match self.mode {
            Mode::Stopwatch => self.presenter.render_laps(self.stopwatch.laps()),
            Mode::Countdown => {
                let status = self.countdown_status();
                self.presenter.render_status(&status);
            }
        }
        self.publish();
    }

    pub fn switch_mode(&mut self, target: Mode) {
        if target == self.mode {
            return;
        }
        if self.is_running() {
            if let Err(err) = self.dispatch_stop() {
                log::error!("couldn't stop {:?} before switching: {}", self.mode, err);
            }
        }
        self.scheduler.stop();
        log::debug!("mode {:?} -> {:?}", self.mode, target);
        self.mode = target;
        self.refresh();
    }

    pub fn dispatch_start(&mut self) -> Result<(), TimerError> {
        let now = self.clock.now();
        let interval_ms = match self.mode {
            Mode::Stopwatch => {
                self.stopwatch.start(now)?;
                self.settings.stopwatch_tick_ms
            }
            Mode::Countdown => {
                self.countdown.start(now)?;
                self.settings.countdown_tick_ms
            }
        };
        self.scheduler.start(interval_ms);
        self.publish_at(now);
        Ok(())
    }

    pub fn dispatch_stop(&mut self) -> Result<(), TimerError> {
        let now = self.clock.now();
        match self.mode {
            Mode::Stopwatch => self.stopwatch.stop(now)?,
            Mode::Countdown => self.countdown.stop(now)?,
        }
        self.scheduler.stop();
        self.publish_at(now);
        Ok(())
    }

    pub fn dispatch_reset(&mut self) -> Result<(), TimerError> {
        match self.mode {
            Mode::Stopwatch => {
                self.stopwatch.reset()?;
                self.presenter.render_laps(self.stopwatch.laps());
            }
            Mode::Countdown => {
                self.countdown.reset()?;
                let status = self.countdown_status();
                self.presenter.render_status(&status);
            }
        }
        self.publish();
        Ok(())
    }

    /// Ignored in countdown mode.
    pub fn dispatch_lap(&mut self) -> Result<(), TimerError> {
        if self.mode == Mode::Countdown {
            log::debug!("lap ignored in countdown mode");
            return Ok(());
        }
        let now = self.clock.now();
        self.stopwatch.lap(now)?;
        self.presenter.render_laps(self.stopwatch.laps());
        self.publish_at(now);
        Ok(())
    }

    /// Set the countdown duration. Allowed from either mode as long as the
    /// countdown is not running.
    pub fn configure_countdown(&mut self, duration_ms: i64) -> Result<(), TimerError> {
        self.countdown.configure(duration_ms)?;
        self.presenter.render_status(&Status::Configured {
            duration_ms: self.countdown.configured_ms(),
        });
        if self.mode == Mode::Countdown {
            self.publish();
        }
        Ok(())
    }

    /// Scheduler callback. Recomputes from absolute timestamps, so the number
    /// of ticks and their spacing never affect the value.
    pub fn on_tick(&mut self) {
        let now = self.clock.now();
        match self.mode {
            Mode::Stopwatch => {
                if !self.stopwatch.is_running() {
                    log::trace!("stale stopwatch tick");
                    return;
                }
                self.presenter.render(self.stopwatch.sample(now));
            }
            Mode::Countdown => match self.countdown.tick_refresh(now) {
                TickOutcome::Stale => log::trace!("stale countdown tick"),
                TickOutcome::Running { remaining_ms } => self.presenter.render(remaining_ms),
                TickOutcome::Completed { configured_ms } => {
                    self.scheduler.stop();
                    self.publish_at(now);
                    self.presenter.render_status(&Status::Completed {
                        duration_ms: configured_ms,
                    });
                    self.presenter.render_completed(configured_ms);
                }
            },
        }
    }

    pub fn on_mode_select(&mut self, mode: Mode) {
        self.switch_mode(mode);
    }

    pub fn on_start_stop(&mut self) -> Result<(), TimerError> {
        let result = if self.is_running() {
            self.dispatch_stop()
        } else {
            self.dispatch_start()
        };
        self.surface(result)
    }

    pub fn on_reset(&mut self) -> Result<(), TimerError> {
        let result = self.dispatch_reset();
        self.surface(result)
    }

    pub fn on_lap(&mut self) -> Result<(), TimerError> {
        let result = self.dispatch_lap();
        self.surface(result)
    }

    /// Negative fields count as zero and seconds are capped at 59.
    pub fn on_configure_countdown(&mut self, minutes: i64, seconds: i64) -> Result<(), TimerError> {
        let minutes = minutes.max(0);
        let seconds = seconds.clamp(0, 59);
        let total_ms = minutes
            .saturating_mul(60)
            .saturating_add(seconds)
            .saturating_mul(1000);
        let result = self.configure_countdown(total_ms);
        self.surface(result)
    }

    pub fn on_preset_countdown(&mut self, duration_ms: u64) -> Result<(), TimerError> {
        let duration_ms = i64::try_from(duration_ms).unwrap_or(i64::MAX);
        let result = self.configure_countdown(duration_ms);
        self.surface(result)
    }

    fn surface(&mut self, result: Result<(), TimerError>) -> Result<(), TimerError> {
        if let Err(err) = result {
            log::warn!("{:?} rejected command: {}", self.mode, err);
            self.presenter.render_status(&Status::Rejected(err));
        }
        result
    }

    fn countdown_status(&self) -> Status {
        let duration_ms = self.countdown.configured_ms();
        match self.countdown.phase() {
            CountdownPhase::Idle => Status::NotSet,
            CountdownPhase::Completed => Status::Completed { duration_ms },
            CountdownPhase::Armed | CountdownPhase::Running => Status::Configured { duration_ms },
        }
    }

    fn view(&self, now: ClockSample) -> EngineView {
        match self.mode {
            Mode::Stopwatch => EngineView {
                running: self.stopwatch.is_running(),
                value_ms: self.stopwatch.sample(now),
                configured_ms: 0,
            },
            Mode::Countdown => EngineView {
                running: self.countdown.is_running(),
                value_ms: self.countdown.sample(),
                configured_ms: self.countdown.configured_ms(),
            },
        }
    }

    fn publish(&mut self) {
        let now = self.clock.now();
        self.publish_at(now);
    }

    // Display value, button label and control enablement, evaluated once per transition.
    fn publish_at(&mut self, now: ClockSample) {
        let view = self.view(now);
        self.presenter.render(view.value_ms);
        self.presenter.render_start_stop(if view.running {
            StartStopLabel::Stop
        } else {
            StartStopLabel::Start
        });
        for (control, enabled) in controls::evaluate(self.mode, &view) {
            self.presenter.set_control_enabled(control, enabled);
        }
    }
}
