//! Interval timer background task
//!
//! A single task owns the `IntervalTimer`. Start/stop requests arrive over a
//! command channel and ticks come from a tokio interval, so every state change
//! happens on this task in order. Results leave as `TimerEvent`s on a broadcast
//! channel and as a `TimerSnapshot` on a watch channel.

use std::time::Duration;

use serde::Serialize;
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    error::TimerError,
    state::DisplayState,
    timer::{DurationInputs, IntervalTimer, TimerEvent, TimerSession, TimerStatus},
};

const COMMAND_BUFFER: usize = 16;
const EVENT_BUFFER: usize = 256;

/// Read-only view of the timer published after every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub countdown: u64,
    pub completed_phases: u64,
    pub session: TimerSession,
    pub display: DisplayState,
}

impl TimerSnapshot {
    fn capture(timer: &IntervalTimer, display: &DisplayState) -> Self {
        Self {
            status: timer.status(),
            countdown: timer.countdown(),
            completed_phases: timer.completed_phases(),
            session: timer.session().clone(),
            display: display.clone(),
        }
    }
}

/// Requests handled by the timer task
#[derive(Debug)]
pub enum TimerCommand {
    Start {
        reply: oneshot::Sender<Result<TimerSnapshot, TimerError>>,
    },
    Stop {
        reply: oneshot::Sender<TimerSnapshot>,
    },
}

/// Cloneable handle to a running timer task
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<TimerCommand>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
    events_tx: broadcast::Sender<TimerEvent>,
}

impl TimerHandle {
    /// Start (or restart) the countdown for the current phase
    pub async fn start(&self) -> Result<TimerSnapshot, TimerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(TimerCommand::Start { reply })
            .await
            .map_err(|_| TimerError::Unavailable)?;
        response.await.map_err(|_| TimerError::Unavailable)?
    }

    /// Cancel the countdown and reset to Workout.
    ///
    /// Once this returns no event from the cancelled countdown will be sent.
    pub async fn stop(&self) -> Result<TimerSnapshot, TimerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(TimerCommand::Stop { reply })
            .await
            .map_err(|_| TimerError::Unavailable)?;
        response.await.map_err(|_| TimerError::Unavailable)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Receive every event published from now on, in order
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events_tx.subscribe()
    }
}

/// Spawn the timer task, reading duration fields from `inputs`
pub fn spawn_interval_timer(
    inputs: watch::Receiver<DurationInputs>,
    tick_period: Duration,
) -> TimerHandle {
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let (events_tx, _) = broadcast::channel(EVENT_BUFFER);

    let display = DisplayState::new(&inputs.borrow().workout);
    let (snapshot_tx, snapshot_rx) =
        watch::channel(TimerSnapshot::capture(&IntervalTimer::new(), &display));

    let publisher = Publisher {
        events_tx: events_tx.clone(),
        snapshot_tx,
        display,
    };
    tokio::spawn(interval_timer_task(commands_rx, inputs, publisher, tick_period));

    TimerHandle {
        commands: commands_tx,
        snapshot_rx,
        events_tx,
    }
}

/// Sends events and keeps the published snapshot in step with them
struct Publisher {
    events_tx: broadcast::Sender<TimerEvent>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    display: DisplayState,
}

impl Publisher {
    fn publish<I>(&mut self, timer: &IntervalTimer, events: I) -> TimerSnapshot
    where
        I: IntoIterator<Item = TimerEvent>,
    {
        for event in events {
            self.display.apply(&event);
            if self.events_tx.send(event).is_err() {
                debug!("No event subscribers");
            }
        }

        let snapshot = TimerSnapshot::capture(timer, &self.display);
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }
}

async fn interval_timer_task(
    mut commands: mpsc::Receiver<TimerCommand>,
    inputs: watch::Receiver<DurationInputs>,
    mut publisher: Publisher,
    tick_period: Duration,
) {
    info!("Starting interval timer task (tick every {:?})", tick_period);

    let mut timer = IntervalTimer::new();
    let mut ticker: Option<Interval> = None;

    loop {
        tokio::select! {
            // Commands win over a ready tick so a stop is never followed by one
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    info!("All timer handles dropped, stopping interval timer task");
                    break;
                };

                match command {
                    TimerCommand::Start { reply } => {
                        let fields = inputs.borrow().clone();
                        let result = match timer.start(&fields) {
                            Ok(event) => {
                                ticker = Some(countdown_ticker(tick_period));
                                Ok(publisher.publish(&timer, [event]))
                            }
                            Err(e) => {
                                warn!("Rejected start request: {}", e);
                                Err(e)
                            }
                        };

                        if reply.send(result).is_err() {
                            debug!("Start requester went away before the reply");
                        }
                    }
                    TimerCommand::Stop { reply } => {
                        ticker = None;
                        let fields = inputs.borrow().clone();
                        let event = timer.stop(&fields);
                        let snapshot = publisher.publish(&timer, [event]);

                        if reply.send(snapshot).is_err() {
                            debug!("Stop requester went away before the reply");
                        }
                    }
                }
            }

            _ = next_tick(&mut ticker) => {
                let fields = inputs.borrow().clone();
                let events = timer.tick(tick_period, &fields);
                if !timer.is_running() {
                    ticker = None;
                }
                publisher.publish(&timer, events);
            }
        }
    }
}

/// Interval whose first tick lands one period after now
fn countdown_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
