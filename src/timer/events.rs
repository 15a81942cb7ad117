//! Notifications emitted by the interval timer

use serde::{Deserialize, Serialize};

use super::{Phase, Progress};

/// Immutable event handed to the presentation layer.
///
/// `countdown` identifies the countdown an event belongs to. Every start,
/// restart and phase flip allocates a new id, so a consumer can drop events
/// from a countdown that has since been superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A countdown began because start was requested
    Started {
        countdown: u64,
        phase: Phase,
        total_millis: u64,
    },
    /// One periodic progress report
    Tick {
        countdown: u64,
        phase: Phase,
        remaining_millis: u64,
        progress: Progress,
    },
    /// A countdown ran out and the next phase began
    PhaseChanged {
        countdown: u64,
        from: Phase,
        to: Phase,
        total_millis: u64,
    },
    /// The timer was reset by a stop request
    Stopped {
        countdown: u64,
        workout_input: String,
    },
    /// The next phase could not start and the timer reset itself
    Halted {
        countdown: u64,
        workout_input: String,
        message: String,
    },
}

impl TimerEvent {
    pub fn countdown(&self) -> u64 {
        match self {
            TimerEvent::Started { countdown, .. }
            | TimerEvent::Tick { countdown, .. }
            | TimerEvent::PhaseChanged { countdown, .. }
            | TimerEvent::Stopped { countdown, .. }
            | TimerEvent::Halted { countdown, .. } => *countdown,
        }
    }
}
