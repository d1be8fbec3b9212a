use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use leadsignal_scout::{DashboardRead, ReadSource, RunController, RunState, Scout};

mod templates;
use templates::*;

// --- App State ---

pub struct AppState {
    pub scout: Arc<Scout>,
    pub controller: RunController,
}

/// Shown when neither a snapshot timestamp nor a finished run is known.
const NO_EXECUTION: &str = "N/A";

// --- Router ---

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/signals", get(api_signals))
        .route("/api/status", get(api_status))
        .route("/regenerate", post(regenerate))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

// --- Handlers ---

async fn dashboard_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let read = state.scout.store().read_for_dashboard().await;
    let last_execution = last_execution(&state, &read).await;
    let running = state.controller.status().await.state == RunState::Running;

    let rows: Vec<SignalRow> = read.signals.iter().map(SignalRow::from).collect();
    Html(render_dashboard(&rows, &last_execution, running))
}

async fn api_signals(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let read = state.scout.store().read_for_dashboard().await;
    let last_execution = last_execution(&state, &read).await;

    match serde_json::to_value(&read.signals) {
        Ok(signals) => Json(json!({
            "success": true,
            "signals": signals,
            "total": read.signals.len(),
            "last_execution": last_execution,
            "source": read.source,
        })),
        Err(e) => {
            warn!(error = %e, "Failed to serialize signals");
            Json(json!({
                "success": false,
                "error": e.to_string(),
                "signals": [],
                "total": 0,
            }))
        }
    }
}

async fn regenerate(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let message = match state.controller.spawn(state.scout.clone()).await {
        Some(_) => {
            info!("Background run started");
            "Run started"
        }
        None => "A run is already in progress",
    };
    Json(json!({ "success": true, "message": message }))
}

async fn api_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.controller.status().await)
}

// --- Helpers ---

/// The snapshot's own timestamp when it served the read, otherwise the
/// finish time of the last run in this process.
async fn last_execution(state: &AppState, read: &DashboardRead) -> String {
    match (&read.source, &read.generated_at) {
        (ReadSource::LocalSnapshot, Some(at)) => at.clone(),
        _ => state
            .controller
            .last_execution()
            .await
            .unwrap_or_else(|| NO_EXECUTION.to_string()),
    }
}
