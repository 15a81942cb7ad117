//! Workout Timer - a two-phase interval timer
//!
//! The timer alternates between a Workout and a Rest countdown, reporting
//! progress once per second until stopped. A small HTTP surface stands in for
//! the input fields, buttons and labels of a timer screen.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TimerError;
pub use state::AppState;
pub use tasks::{spawn_interval_timer, TimerHandle};
pub use timer::{IntervalTimer, Phase, TimerEvent, TimerSession};
pub use utils::signals::shutdown_signal;
