//! Interval timer state machine.
//!
//! The engine owns no clock and no thread. Whoever drives it calls `tick()`
//! once per elapsed period and forwards the returned events.
//!
//! ```text
//! Idle --start--> Running(Workout) --countdown done--> Running(Rest) --> Running(Workout) ...
//!                       any Running state --stop--> Idle
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{DurationInputs, Phase, TimerEvent, TimerSession};
use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "phase", rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running(Phase),
}

/// Alternating workout/rest countdown
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    session: TimerSession,
    /// Id of the most recent countdown, bumped whenever one is started or cancelled
    countdown: u64,
    completed_phases: u64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn countdown(&self) -> u64 {
        self.countdown
    }

    /// Countdowns that ran to zero since the last start from idle
    pub fn completed_phases(&self) -> u64 {
        self.completed_phases
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn status(&self) -> TimerStatus {
        if self.session.running {
            TimerStatus::Running(self.session.phase)
        } else {
            TimerStatus::Idle
        }
    }

    /// Begin a countdown for the current phase, replacing any running one.
    ///
    /// Both inputs must be valid; on error nothing changes.
    pub fn start(&mut self, inputs: &DurationInputs) -> Result<TimerEvent, TimerError> {
        inputs.validate()?;
        let phase = self.session.phase;
        let total_millis = inputs.duration_millis(phase)?;

        if self.session.running {
            info!("Restarting {} countdown", phase);
        } else {
            self.completed_phases = 0;
        }

        self.countdown += 1;
        self.session = TimerSession::running(phase, total_millis);
        info!(
            "Countdown {} started: {} for {}s",
            self.countdown,
            phase,
            total_millis / 1000
        );

        Ok(TimerEvent::Started {
            countdown: self.countdown,
            phase,
            total_millis,
        })
    }

    /// Account for `elapsed` time of the running countdown.
    ///
    /// Yields the tick report and, when the countdown hits zero, the event for
    /// the following phase. Inputs are only read at that boundary.
    pub fn tick(&mut self, elapsed: Duration, inputs: &DurationInputs) -> Vec<TimerEvent> {
        let elapsed_millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if !self.session.running || elapsed_millis == 0 {
            return Vec::new();
        }

        let remaining_millis = self.session.advance(elapsed_millis);
        let progress = self.session.progress();
        debug!(
            "Tick {}: {} {}ms left ({}%)",
            self.countdown, self.session.phase, remaining_millis, progress.percent_remaining
        );

        let mut events = vec![TimerEvent::Tick {
            countdown: self.countdown,
            phase: self.session.phase,
            remaining_millis,
            progress,
        }];

        if self.session.is_finished() {
            events.push(self.complete_phase(inputs));
        }

        events
    }

    /// Cancel whatever is running and return to the Workout phase
    pub fn stop(&mut self, inputs: &DurationInputs) -> TimerEvent {
        if self.session.running {
            info!("Stopping countdown {}", self.countdown);
        } else {
            debug!("Stop requested while idle");
        }

        self.reset(inputs);
        TimerEvent::Stopped {
            countdown: self.countdown,
            workout_input: inputs.workout.clone(),
        }
    }

    fn complete_phase(&mut self, inputs: &DurationInputs) -> TimerEvent {
        let from = self.session.phase;
        let to = from.other();
        self.completed_phases += 1;

        match inputs.duration_millis(to) {
            Ok(total_millis) => {
                self.countdown += 1;
                self.session = TimerSession::running(to, total_millis);
                info!(
                    "{} finished, countdown {} started: {} for {}s",
                    from,
                    self.countdown,
                    to,
                    total_millis / 1000
                );
                TimerEvent::PhaseChanged {
                    countdown: self.countdown,
                    from,
                    to,
                    total_millis,
                }
            }
            Err(e) => {
                warn!("Cannot begin {} phase, halting timer: {}", to, e);
                self.reset(inputs);
                TimerEvent::Halted {
                    countdown: self.countdown,
                    workout_input: inputs.workout.clone(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn reset(&mut self, inputs: &DurationInputs) {
        if self.session.running {
            self.countdown += 1;
        }
        self.completed_phases = 0;
        let workout_millis = inputs.duration_millis(Phase::Workout).unwrap_or(0);
        self.session = TimerSession::idle(workout_millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn inputs(workout: &str, rest: &str) -> DurationInputs {
        DurationInputs::new(workout, rest)
    }

    /// Tick once per second until the phase flips, returning all events
    fn run_to_flip(timer: &mut IntervalTimer, inputs: &DurationInputs) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            let batch = timer.tick(SECOND, inputs);
            let flipped = batch
                .iter()
                .any(|e| !matches!(e, TimerEvent::Tick { .. }));
            events.extend(batch);
            if flipped {
                return events;
            }
        }
        panic!("countdown never finished");
    }

    #[test]
    fn start_from_idle_runs_workout() {
        let mut timer = IntervalTimer::new();
        assert_eq!(timer.status(), TimerStatus::Idle);

        let event = timer.start(&inputs("30", "15")).unwrap();
        assert_eq!(
            event,
            TimerEvent::Started { countdown: 1, phase: Phase::Workout, total_millis: 30_000 }
        );
        assert_eq!(timer.status(), TimerStatus::Running(Phase::Workout));
        assert_eq!(timer.session().remaining_millis, 30_000);
        assert_eq!(timer.session().total_duration_millis, 30_000);
    }

    #[test]
    fn ticks_strictly_decrease_within_phase() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("5", "3");
        timer.start(&fields).unwrap();

        let events = run_to_flip(&mut timer, &fields);
        let remaining: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Tick { remaining_millis, .. } => Some(*remaining_millis),
                _ => None,
            })
            .collect();

        assert_eq!(remaining, vec![4_000, 3_000, 2_000, 1_000, 0]);
        // final zero tick comes before the flip
        assert!(matches!(events.last(), Some(TimerEvent::PhaseChanged { .. })));
    }

    #[test]
    fn tick_reports_percent_and_seconds() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("4", "2");
        timer.start(&fields).unwrap();

        let events = timer.tick(SECOND, &fields);
        match &events[..] {
            [TimerEvent::Tick { progress, .. }] => {
                assert_eq!(progress.percent_remaining, 75);
                assert_eq!(progress.seconds_remaining, 3);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn workout_and_rest_scenario() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("30", "15");
        timer.start(&fields).unwrap();

        for _ in 0..29 {
            timer.tick(SECOND, &fields);
        }
        assert_eq!(timer.status(), TimerStatus::Running(Phase::Workout));

        let events = timer.tick(SECOND, &fields);
        assert!(events.contains(&TimerEvent::PhaseChanged {
            countdown: 2,
            from: Phase::Workout,
            to: Phase::Rest,
            total_millis: 15_000,
        }));
        assert_eq!(timer.status(), TimerStatus::Running(Phase::Rest));
        assert_eq!(timer.session().remaining_millis, 15_000);

        for _ in 0..15 {
            timer.tick(SECOND, &fields);
        }
        assert_eq!(timer.status(), TimerStatus::Running(Phase::Workout));
        assert_eq!(timer.session().remaining_millis, 30_000);
        assert_eq!(timer.completed_phases(), 2);

        let stopped = timer.stop(&fields);
        assert!(matches!(stopped, TimerEvent::Stopped { ref workout_input, .. } if workout_input == "30"));
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.session(), &TimerSession::idle(30_000));
        assert_eq!(timer.session().progress().percent_remaining, 100);
    }

    #[test]
    fn completions_alternate_phases() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("2", "1");
        timer.start(&fields).unwrap();

        for k in 0..6 {
            let events = run_to_flip(&mut timer, &fields);
            let expected_from = if k % 2 == 0 { Phase::Workout } else { Phase::Rest };
            match events.last() {
                Some(TimerEvent::PhaseChanged { from, to, .. }) => {
                    assert_eq!(*from, expected_from, "completion {}", k);
                    assert_eq!(*to, expected_from.other());
                }
                other => panic!("expected phase change, got {:?}", other),
            }
        }
    }

    #[test]
    fn stop_twice_matches_stop_once() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("20", "10");
        timer.start(&fields).unwrap();
        timer.tick(SECOND, &fields);

        let first = timer.stop(&fields);
        let session = timer.session().clone();
        let countdown = timer.countdown();

        let second = timer.stop(&fields);
        assert_eq!(first, second);
        assert_eq!(timer.session(), &session);
        assert_eq!(timer.countdown(), countdown);
        assert_eq!(session, TimerSession::idle(20_000));
    }

    #[test]
    fn stop_while_idle_is_a_reset() {
        let mut timer = IntervalTimer::new();
        let event = timer.stop(&inputs("45", "10"));
        assert_eq!(
            event,
            TimerEvent::Stopped { countdown: 0, workout_input: "45".to_string() }
        );
        assert_eq!(timer.session(), &TimerSession::idle(45_000));
    }

    #[test]
    fn restart_replaces_running_countdown() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("10", "5");
        timer.start(&fields).unwrap();
        timer.tick(SECOND * 3, &fields);
        assert_eq!(timer.session().remaining_millis, 7_000);

        timer.start(&fields).unwrap();
        assert_eq!(timer.countdown(), 2);
        assert_eq!(timer.session().remaining_millis, 10_000);

        let events = timer.tick(SECOND, &fields);
        assert!(events.iter().all(|e| e.countdown() == 2));
    }

    #[test]
    fn restart_during_rest_restarts_rest() {
        let mut timer = IntervalTimer::new();
        let fields = inputs("1", "8");
        timer.start(&fields).unwrap();
        timer.tick(SECOND, &fields);
        timer.tick(SECOND * 2, &fields);
        assert_eq!(timer.session().remaining_millis, 6_000);

        timer.start(&fields).unwrap();
        assert_eq!(timer.status(), TimerStatus::Running(Phase::Rest));
        assert_eq!(timer.session().remaining_millis, 8_000);
    }

    #[test]
    fn invalid_input_leaves_idle_timer_untouched() {
        let mut timer = IntervalTimer::new();
        let err = timer.start(&inputs("thirty", "15")).unwrap_err();
        assert_eq!(err, TimerError::invalid_duration(Phase::Workout, "thirty"));
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.countdown(), 0);
    }

    #[test]
    fn invalid_input_leaves_running_timer_untouched() {
        let mut timer = IntervalTimer::new();
        let good = inputs("10", "5");
        timer.start(&good).unwrap();
        timer.tick(SECOND, &good);
        let before = timer.session().clone();

        assert!(timer.start(&inputs("10", "")).is_err());
        assert_eq!(timer.session(), &before);
        assert_eq!(timer.countdown(), 1);
    }

    #[test]
    fn duration_edits_apply_at_next_phase_start() {
        let mut timer = IntervalTimer::new();
        timer.start(&inputs("3", "2")).unwrap();

        let edited = inputs("60", "7");
        timer.tick(SECOND, &edited);
        assert_eq!(timer.session().total_duration_millis, 3_000);
        assert_eq!(timer.session().remaining_millis, 2_000);

        run_to_flip(&mut timer, &edited);
        assert_eq!(timer.session().phase, Phase::Rest);
        assert_eq!(timer.session().total_duration_millis, 7_000);
    }

    #[test]
    fn invalid_next_phase_halts() {
        let mut timer = IntervalTimer::new();
        timer.start(&inputs("1", "5")).unwrap();

        let events = timer.tick(SECOND, &inputs("1", "x"));
        match events.last() {
            Some(TimerEvent::Halted { message, workout_input, .. }) => {
                assert!(message.contains("Rest"));
                assert_eq!(workout_input, "1");
            }
            other => panic!("expected halt, got {:?}", other),
        }
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.session(), &TimerSession::idle(1_000));
    }

    #[test]
    fn idle_timer_ignores_ticks() {
        let mut timer = IntervalTimer::new();
        assert!(timer.tick(SECOND, &inputs("5", "5")).is_empty());

        timer.start(&inputs("5", "5")).unwrap();
        assert!(timer.tick(Duration::ZERO, &inputs("5", "5")).is_empty());
    }
}
