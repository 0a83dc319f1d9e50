use crate::clock::ClockSample;
use crate::error::TimerError;

/// Count-up timer that accrues time across start/stop segments.
///
/// Elapsed time is always re-derived from the segment start, so a late or
/// missed tick never skews the value.
#[derive(Debug, Default)]
pub struct StopwatchEngine {
    accumulated_ms: u64,
    segment_start: Option<ClockSample>,
    // Most recent first.
    laps: Vec<u64>,
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.segment_start.is_some()
    }

    pub fn start(&mut self, now: ClockSample) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        self.segment_start = Some(now);
        log::debug!("stopwatch started at {:?}, accumulated {} ms", now, self.accumulated_ms);
        Ok(())
    }

    pub fn stop(&mut self, now: ClockSample) -> Result<(), TimerError> {
        let start = self.segment_start.take().ok_or(TimerError::NotRunning)?;
        self.accumulated_ms += now.since(start);
        log::debug!("stopwatch stopped, accumulated {} ms", self.accumulated_ms);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::InvalidState);
        }
        self.accumulated_ms = 0;
        self.laps.clear();
        Ok(())
    }

    /// Snapshot the running total onto the front of the lap list.
    /// Unlike a split, the total keeps counting from where it was.
    pub fn lap(&mut self, now: ClockSample) -> Result<u64, TimerError> {
        if !self.is_running() {
            return Err(TimerError::NotRunning);
        }
        let elapsed = self.sample(now);
        self.laps.insert(0, elapsed);
        log::debug!("lap {} at {} ms", self.laps.len(), elapsed);
        Ok(elapsed)
    }

    pub fn sample(&self, now: ClockSample) -> u64 {
        match self.segment_start {
            Some(start) => self.accumulated_ms + now.since(start),
            None => self.accumulated_ms,
        }
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }
}
