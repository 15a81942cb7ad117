//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{error::TimerError, state::AppState, timer::DurationInputs};
use super::responses::{ApiResponse, HealthResponse, InputsRequest, StatusResponse};

type ApiError = (StatusCode, Json<ApiResponse>);

/// Map a timer error to a status code plus a user-visible message
fn timer_error(state: &AppState, e: TimerError) -> ApiError {
    let status = match e {
        TimerError::InvalidDuration { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TimerError::Unavailable => {
            error!("Timer task is gone");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (
        status,
        Json(ApiResponse::error(e.to_string(), state.get_snapshot().display)),
    )
}

/// Handle POST /start - Start (or restart) the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    match state.start_timer().await {
        Ok(snapshot) => {
            info!("Start endpoint called - {} countdown running", snapshot.session.phase);
            Ok(Json(ApiResponse::running(
                format!("{} countdown started", snapshot.session.phase),
                snapshot.display,
            )))
        }
        Err(e) => {
            warn!("Start endpoint rejected: {}", e);
            Err(timer_error(&state, e))
        }
    }
}

/// Handle POST /stop - Cancel the countdown and reset to Workout
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    match state.stop_timer().await {
        Ok(snapshot) => {
            info!("Stop endpoint called - timer reset");
            Ok(Json(ApiResponse::idle(
                "Timer stopped".to_string(),
                snapshot.display,
            )))
        }
        Err(e) => Err(timer_error(&state, e)),
    }
}

/// Handle PUT /inputs - Replace the duration input text
pub async fn inputs_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InputsRequest>,
) -> Json<DurationInputs> {
    Json(state.update_inputs(request.workout, request.rest))
}

/// Handle GET /status - Return the current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.get_snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        status: snapshot.status,
        display: snapshot.display,
        session: snapshot.session,
        inputs: state.get_inputs(),
        countdown: snapshot.countdown,
        completed_phases: snapshot.completed_phases,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream timer events as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("Event stream subscriber connected");
    let events = state.timer.subscribe();

    let stream = stream::unfold(events, |mut events| async move {
        loop {
            match events.recv().await {
                Ok(event) => return Some((Event::default().json_data(&event), events)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
