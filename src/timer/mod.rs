//! Interval timer core
//!
//! The phase model, countdown session, duration inputs and the state machine
//! that ties them together. Nothing in here knows about clocks or channels.

pub mod engine;
pub mod events;
pub mod inputs;
pub mod phase;
pub mod session;

pub use engine::{IntervalTimer, TimerStatus};
pub use events::TimerEvent;
pub use inputs::DurationInputs;
pub use phase::Phase;
pub use session::{Progress, TimerSession};
