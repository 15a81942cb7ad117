//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use crate::{
    error::TimerError,
    tasks::{spawn_interval_timer, TimerHandle, TimerSnapshot},
    timer::DurationInputs,
};

/// State shared by the HTTP handlers: the input fields and the timer handle
#[derive(Debug)]
pub struct AppState {
    /// Handle to the task that owns the interval timer
    pub timer: TimerHandle,
    /// Text of the workout/rest duration inputs
    pub inputs_tx: watch::Sender<DurationInputs>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create the state and spawn the timer task. Must run inside a tokio runtime.
    pub fn new(port: u16, host: String, inputs: DurationInputs, tick_period: Duration) -> Self {
        let (inputs_tx, inputs_rx) = watch::channel(inputs);
        let timer = spawn_interval_timer(inputs_rx, tick_period);

        Self {
            timer,
            inputs_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start requested
    pub async fn start_timer(&self) -> Result<TimerSnapshot, TimerError> {
        self.record_action("start");
        self.timer.start().await
    }

    /// Stop requested
    pub async fn stop_timer(&self) -> Result<TimerSnapshot, TimerError> {
        self.record_action("stop");
        self.timer.stop().await
    }

    pub fn get_inputs(&self) -> DurationInputs {
        self.inputs_tx.borrow().clone()
    }

    /// Replace the text of the given input fields, leaving the others alone
    pub fn update_inputs(&self, workout: Option<String>, rest: Option<String>) -> DurationInputs {
        self.inputs_tx.send_modify(|inputs| {
            if let Some(workout) = workout {
                inputs.workout = workout;
            }
            if let Some(rest) = rest {
                inputs.rest = rest;
            }
        });

        let inputs = self.get_inputs();
        info!("Duration inputs set to workout='{}', rest='{}'", inputs.workout, inputs.rest);
        self.record_action("inputs");
        inputs
    }

    pub fn get_snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
