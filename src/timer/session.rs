//! Live countdown state

use serde::{Deserialize, Serialize};

use super::Phase;

/// Progress values reported together on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 0..=100, share of the countdown still left
    pub percent_remaining: u8,
    pub seconds_remaining: u64,
}

impl Progress {
    /// Progress shown before a countdown has consumed any time
    pub fn full(total_millis: u64) -> Self {
        Self {
            percent_remaining: 100,
            seconds_remaining: round_div(total_millis as u128, 1000) as u64,
        }
    }
}

/// The currently active (or just reset) countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub phase: Phase,
    pub total_duration_millis: u64,
    pub remaining_millis: u64,
    pub running: bool,
}

impl TimerSession {
    /// A fresh running countdown for `phase`
    pub fn running(phase: Phase, total_duration_millis: u64) -> Self {
        Self {
            phase,
            total_duration_millis,
            remaining_millis: total_duration_millis,
            running: true,
        }
    }

    /// The stopped session: Workout phase at its full duration
    pub fn idle(workout_millis: u64) -> Self {
        Self {
            phase: Phase::Workout,
            total_duration_millis: workout_millis,
            remaining_millis: workout_millis,
            running: false,
        }
    }

    /// Consume `elapsed_millis` of the countdown, returning the new remaining time
    pub fn advance(&mut self, elapsed_millis: u64) -> u64 {
        self.remaining_millis = self.remaining_millis.saturating_sub(elapsed_millis);
        self.remaining_millis
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_millis == 0
    }

    pub fn progress(&self) -> Progress {
        let percent_remaining = if self.total_duration_millis == 0 {
            100
        } else {
            round_div(
                self.remaining_millis as u128 * 100,
                self.total_duration_millis as u128,
            )
            .min(100) as u8
        };

        Progress {
            percent_remaining,
            seconds_remaining: round_div(self.remaining_millis as u128, 1000) as u64,
        }
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::idle(0)
    }
}

/// Integer division rounding halves up
fn round_div(numerator: u128, denominator: u128) -> u128 {
    (numerator + denominator / 2) / denominator
}
