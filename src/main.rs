//! Workout Timer - a two-phase interval timer served over HTTP
//!
//! This is the main entry point for the workout-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use workout_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting workout-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, workout={}s, rest={}s, tick={}ms",
          config.host, config.port, config.workout, config.rest, config.tick_ms);

    // Create application state, which spawns the interval timer task
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.initial_inputs(),
        config.tick_period(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  PUT  /inputs - Set workout/rest duration text");
    info!("  POST /start  - Start or restart the countdown");
    info!("  POST /stop   - Stop and reset to Workout");
    info!("  GET  /status - Current phase, progress and remaining time");
    info!("  GET  /events - Server-sent timer events");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
