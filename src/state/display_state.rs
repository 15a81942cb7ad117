//! What the presentation layer shows

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, Progress, TimerEvent};

/// Phase label, progress bar fill and remaining-seconds label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub phase_label: String,
    /// Progress bar fill, 0..=100
    pub progress: u8,
    pub remaining_label: String,
}

impl DisplayState {
    /// Display before anything has been started
    pub fn new(workout_input: &str) -> Self {
        Self::reset(workout_input)
    }

    /// Default display: full Workout bar showing the typed workout duration
    pub fn reset(workout_input: &str) -> Self {
        Self {
            phase_label: Phase::Workout.label().to_string(),
            progress: 100,
            remaining_label: workout_input.trim().to_string(),
        }
    }

    fn show_phase_start(&mut self, phase: Phase, total_millis: u64) {
        let progress = Progress::full(total_millis);
        self.phase_label = phase.label().to_string();
        self.progress = progress.percent_remaining;
        self.remaining_label = progress.seconds_remaining.to_string();
    }

    /// Fold one timer event into the display
    pub fn apply(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Started { phase, total_millis, .. } => {
                self.show_phase_start(*phase, *total_millis);
            }
            TimerEvent::Tick { progress, .. } => {
                self.progress = progress.percent_remaining;
                self.remaining_label = progress.seconds_remaining.to_string();
            }
            TimerEvent::PhaseChanged { to, total_millis, .. } => {
                self.show_phase_start(*to, *total_millis);
            }
            TimerEvent::Stopped { workout_input, .. }
            | TimerEvent::Halted { workout_input, .. } => {
                *self = Self::reset(workout_input);
            }
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new("")
    }
}
