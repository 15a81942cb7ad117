//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod interval_timer;

// Re-export main types
pub use interval_timer::{spawn_interval_timer, TimerCommand, TimerHandle, TimerSnapshot};
