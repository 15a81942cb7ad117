//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::timer::DurationInputs;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "workout-timer")]
#[command(about = "A two-phase workout/rest interval timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial text of the workout duration input, in seconds
    #[arg(short, long, default_value = "30")]
    pub workout: String,

    /// Initial text of the rest duration input, in seconds
    #[arg(short, long, default_value = "15")]
    pub rest: String,

    /// Tick cadence in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Duration inputs as they read before the user edits them
    pub fn initial_inputs(&self) -> DurationInputs {
        DurationInputs::new(self.workout.clone(), self.rest.clone())
    }
}
