//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::DisplayState,
    timer::{DurationInputs, TimerSession, TimerStatus},
};

/// API response structure for start/stop endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: DisplayState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, display: DisplayState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Create a running response
    pub fn running(message: String, display: DisplayState) -> Self {
        Self::new("running".to_string(), message, display)
    }

    /// Create an idle response
    pub fn idle(message: String, display: DisplayState) -> Self {
        Self::new("idle".to_string(), message, display)
    }

    /// Create an error response
    pub fn error(message: String, display: DisplayState) -> Self {
        Self::new("error".to_string(), message, display)
    }
}

/// Body of PUT /inputs; absent fields keep their current text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputsRequest {
    pub workout: Option<String>,
    pub rest: Option<String>,
}

/// Status response with the full timer snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TimerStatus,
    pub display: DisplayState,
    pub session: TimerSession,
    pub inputs: DurationInputs,
    pub countdown: u64,
    pub completed_phases: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
