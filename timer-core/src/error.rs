use thiserror::Error;

/// Reasons an engine rejects a command. State is left untouched in every case.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum TimerError {
    #[error("timer is already running")]
    AlreadyRunning,
    #[error("timer is not running")]
    NotRunning,
    #[error("not allowed while the timer is running")]
    InvalidState,
    #[error("duration must be at least 1 ms")]
    InvalidDuration,
    #[error("no countdown duration is set")]
    NotConfigured,
}
