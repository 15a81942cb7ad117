//! State management module
//!
//! Shared application state and the view model the presentation layer renders.

pub mod app_state;
pub mod display_state;

// Re-export main types
pub use app_state::AppState;
pub use display_state::DisplayState;
