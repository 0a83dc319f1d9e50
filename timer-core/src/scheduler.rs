/// Periodic tick driver.
///
/// Implementations post ticks to the owner's event queue; the owner answers
/// each one with `ModeController::on_tick`. Ticks may arrive late, never early,
/// and one may still be queued after `stop` returns.
pub trait TickScheduler {
    fn start(&mut self, interval_ms: u64);
    /// Idempotent.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Scheduler that never fires on its own. The driver calls `on_tick` when it
/// decides a tick is due; useful headless and in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    interval_ms: Option<u64>,
    starts: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval_ms(&self) -> Option<u64> {
        self.interval_ms
    }

    /// Number of stopped-to-running transitions seen.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, interval_ms: u64) {
        if self.interval_ms.is_none() {
            self.starts += 1;
        }
        self.interval_ms = Some(interval_ms);
    }

    fn stop(&mut self) {
        self.interval_ms = None;
    }

    fn is_running(&self) -> bool {
        self.interval_ms.is_some()
    }
}
