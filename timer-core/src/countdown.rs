use crate::clock::ClockSample;
use crate::error::TimerError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CountdownPhase {
    /// No duration configured yet.
    Idle,
    /// Configured and paused or freshly reset.
    Armed,
    Running,
    /// Reached zero on its own. Needs `configure` or `reset` before the next start.
    Completed,
}

/// Result of a scheduler tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// The engine was not running; a tick queued before `stop` landed late.
    Stale,
    Running { remaining_ms: u64 },
    Completed { configured_ms: u64 },
}

/// Count-down timer toward a configured duration.
///
/// While running only the absolute end time is authoritative; `remaining_ms`
/// is a cache refreshed on stop and on each tick.
#[derive(Debug, Default)]
pub struct CountdownEngine {
    configured_ms: u64,
    remaining_ms: u64,
    end_time: Option<ClockSample>,
    completed: bool,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.is_running() {
            CountdownPhase::Running
        } else if self.completed {
            CountdownPhase::Completed
        } else if self.configured_ms == 0 {
            CountdownPhase::Idle
        } else {
            CountdownPhase::Armed
        }
    }

    pub fn configured_ms(&self) -> u64 {
        self.configured_ms
    }

    /// Accepts a signed request so callers can hand over raw user arithmetic;
    /// anything below 1 ms is rejected.
    pub fn configure(&mut self, duration_ms: i64) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::InvalidState);
        }
        if duration_ms <= 0 {
            return Err(TimerError::InvalidDuration);
        }
        self.configured_ms = duration_ms as u64;
        self.remaining_ms = self.configured_ms;
        self.completed = false;
        log::debug!("countdown configured for {} ms", self.configured_ms);
        Ok(())
    }

    pub fn start(&mut self, now: ClockSample) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        if self.remaining_ms == 0 {
            return Err(TimerError::NotConfigured);
        }
        self.end_time = Some(now.offset(self.remaining_ms));
        self.completed = false;
        log::debug!("countdown started with {} ms left", self.remaining_ms);
        Ok(())
    }

    pub fn stop(&mut self, now: ClockSample) -> Result<(), TimerError> {
        let end = self.end_time.take().ok_or(TimerError::NotRunning)?;
        self.remaining_ms = self.clamp(end.since(now));
        log::debug!("countdown stopped with {} ms left", self.remaining_ms);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::InvalidState);
        }
        self.remaining_ms = self.configured_ms;
        if self.configured_ms > 0 {
            self.completed = false;
        }
        Ok(())
    }

    pub fn tick_refresh(&mut self, now: ClockSample) -> TickOutcome {
        let Some(end) = self.end_time else {
            return TickOutcome::Stale;
        };
        self.remaining_ms = self.clamp(end.since(now));
        if self.remaining_ms > 0 {
            return TickOutcome::Running { remaining_ms: self.remaining_ms };
        }
        self.end_time = None;
        self.completed = true;
        log::info!("countdown of {} ms completed", self.configured_ms);
        TickOutcome::Completed { configured_ms: self.configured_ms }
    }

    pub fn sample(&self) -> u64 {
        self.remaining_ms
    }

    fn clamp(&self, ms: u64) -> u64 {
        ms.min(self.configured_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> ClockSample {
        ClockSample::from_ms(ms)
    }

    #[test]
    fn test_countdown_basic() {
        let mut cd = CountdownEngine::new();
        assert_eq!(cd.phase(), CountdownPhase::Idle);

        cd.configure(10_000).unwrap();
        assert_eq!(cd.phase(), CountdownPhase::Armed);
        assert_eq!(cd.sample(), 10_000);

        cd.start(at(1000)).unwrap();
        assert_eq!(cd.phase(), CountdownPhase::Running);
        assert_eq!(cd.tick_refresh(at(6000)), TickOutcome::Running { remaining_ms: 5_000 });

        cd.stop(at(7000)).unwrap();
        assert_eq!(cd.sample(), 4_000);
        assert_eq!(cd.phase(), CountdownPhase::Armed);

        // Paused time does not count.
        cd.start(at(20_000)).unwrap();
        assert_eq!(cd.tick_refresh(at(21_000)), TickOutcome::Running { remaining_ms: 3_000 });
    }

    #[test]
    fn test_completion_after_full_duration() {
        let mut cd = CountdownEngine::new();
        cd.configure(65_000).unwrap();
        cd.start(at(500)).unwrap();

        assert_eq!(cd.tick_refresh(at(65_500)), TickOutcome::Completed { configured_ms: 65_000 });
        assert_eq!(cd.sample(), 0);
        assert!(!cd.is_running());
        assert_eq!(cd.phase(), CountdownPhase::Completed);
    }

    #[test]
    fn test_late_tick_clamps_to_zero() {
        let mut cd = CountdownEngine::new();
        cd.configure(1_000).unwrap();
        cd.start(at(0)).unwrap();
        assert_eq!(cd.tick_refresh(at(90_000)), TickOutcome::Completed { configured_ms: 1_000 });
        assert_eq!(cd.sample(), 0);
    }

    #[test]
    fn test_remaining_non_increasing() {
        let mut cd = CountdownEngine::new();
        cd.configure(3_000).unwrap();
        cd.start(at(0)).unwrap();

        let mut last = cd.sample();
        let mut now = 0;
        loop {
            now += 70;
            match cd.tick_refresh(at(now)) {
                TickOutcome::Running { remaining_ms } => {
                    assert!(remaining_ms <= last);
                    assert!(remaining_ms <= 3_000);
                    last = remaining_ms;
                }
                TickOutcome::Completed { .. } => break,
                TickOutcome::Stale => panic!("tick while running reported stale"),
            }
        }
        assert_eq!(cd.sample(), 0);
    }

    #[test]
    fn test_start_requires_time_left() {
        let mut cd = CountdownEngine::new();
        assert_eq!(cd.start(at(0)), Err(TimerError::NotConfigured));

        cd.configure(100).unwrap();
        cd.start(at(0)).unwrap();
        cd.tick_refresh(at(100));
        assert_eq!(cd.start(at(200)), Err(TimerError::NotConfigured));

        cd.reset().unwrap();
        assert_eq!(cd.phase(), CountdownPhase::Armed);
        cd.start(at(200)).unwrap();
    }

    #[test]
    fn test_configure_rejects_non_positive() {
        let mut cd = CountdownEngine::new();
        cd.configure(4_000).unwrap();

        assert_eq!(cd.configure(-5), Err(TimerError::InvalidDuration));
        assert_eq!(cd.configure(0), Err(TimerError::InvalidDuration));
        assert_eq!(cd.configured_ms(), 4_000);
        assert_eq!(cd.sample(), 4_000);
    }

    #[test]
    fn test_configure_then_reset_round_trip() {
        let mut cd = CountdownEngine::new();
        cd.configure(42_000).unwrap();
        cd.start(at(0)).unwrap();
        cd.stop(at(10_000)).unwrap();
        assert_eq!(cd.sample(), 32_000);

        cd.reset().unwrap();
        assert_eq!(cd.sample(), 42_000);
    }

    #[test]
    fn test_running_rejections() {
        let mut cd = CountdownEngine::new();
        cd.configure(5_000).unwrap();
        cd.start(at(0)).unwrap();

        assert_eq!(cd.start(at(10)), Err(TimerError::AlreadyRunning));
        assert_eq!(cd.configure(1_000), Err(TimerError::InvalidState));
        assert_eq!(cd.reset(), Err(TimerError::InvalidState));
        assert_eq!(cd.configured_ms(), 5_000);

        cd.stop(at(1_000)).unwrap();
        assert_eq!(cd.stop(at(1_000)), Err(TimerError::NotRunning));
    }

    #[test]
    fn test_stale_tick_is_noop() {
        let mut cd = CountdownEngine::new();
        cd.configure(5_000).unwrap();
        cd.start(at(0)).unwrap();
        cd.stop(at(2_000)).unwrap();

        assert_eq!(cd.tick_refresh(at(9_000)), TickOutcome::Stale);
        assert_eq!(cd.sample(), 3_000);
        assert_eq!(cd.phase(), CountdownPhase::Armed);
    }

    #[test]
    fn test_manual_stop_at_zero_is_not_completion() {
        let mut cd = CountdownEngine::new();
        cd.configure(1_000).unwrap();
        cd.start(at(0)).unwrap();
        cd.stop(at(1_500)).unwrap();
        assert_eq!(cd.sample(), 0);
        assert_eq!(cd.phase(), CountdownPhase::Armed);
    }

    #[test]
    fn test_reconfigure_leaves_completed() {
        let mut cd = CountdownEngine::new();
        cd.configure(10).unwrap();
        cd.start(at(0)).unwrap();
        cd.tick_refresh(at(10));
        assert_eq!(cd.phase(), CountdownPhase::Completed);

        cd.configure(20).unwrap();
        assert_eq!(cd.phase(), CountdownPhase::Armed);
        assert_eq!(cd.sample(), 20);
    }
}
