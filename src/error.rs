//! Error types for the interval timer

use thiserror::Error;

use crate::timer::Phase;

/// Errors surfaced by the interval timer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A duration input could not be parsed as a positive number of seconds
    #[error("{phase} duration must be a positive whole number of seconds, got '{input}'")]
    InvalidDuration { phase: Phase, input: String },

    /// The timer task is no longer running
    #[error("Interval timer is unavailable")]
    Unavailable,
}

impl TimerError {
    pub fn invalid_duration(phase: Phase, input: impl Into<String>) -> Self {
        Self::InvalidDuration {
            phase,
            input: input.into(),
        }
    }
}
