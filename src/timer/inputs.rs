//! Duration input fields as typed by the user

use serde::{Deserialize, Serialize};

use super::Phase;
use crate::error::TimerError;

/// Raw text of the two duration inputs, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationInputs {
    pub workout: String,
    pub rest: String,
}

impl DurationInputs {
    pub fn new(workout: impl Into<String>, rest: impl Into<String>) -> Self {
        Self {
            workout: workout.into(),
            rest: rest.into(),
        }
    }

    /// Text currently typed into the given phase's field
    pub fn text(&self, phase: Phase) -> &str {
        match phase {
            Phase::Workout => &self.workout,
            Phase::Rest => &self.rest,
        }
    }

    /// Resolve a phase's duration in milliseconds
    pub fn duration_millis(&self, phase: Phase) -> Result<u64, TimerError> {
        let text = self.text(phase);
        let seconds = text
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| TimerError::invalid_duration(phase, text))?;

        seconds
            .checked_mul(1000)
            .ok_or_else(|| TimerError::invalid_duration(phase, text))
    }

    /// Check that both fields hold a usable duration
    pub fn validate(&self) -> Result<(), TimerError> {
        self.duration_millis(Phase::Workout)?;
        self.duration_millis(Phase::Rest)?;
        Ok(())
    }
}

impl Default for DurationInputs {
    fn default() -> Self {
        Self::new("30", "15")
    }
}
