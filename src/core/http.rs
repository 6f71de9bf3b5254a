//! HTTP surface using Axum: health, metrics and manual scan trigger

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, Level};

use crate::metrics::Metrics;
use crate::models::TriggerSource;

use super::runtime::ScanRuntime;

#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ScanRuntime>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(runtime: Arc<ScanRuntime>, metrics: Arc<Metrics>) -> Self {
        Self {
            runtime,
            metrics,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Liveness plus the outcome of the most recent cycle
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let runtime = &state.runtime;
    Json(json!({
        "status": "healthy",
        "service": "falcon-scanner",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "cycle_in_progress": runtime.is_running(),
        "last_cycle": runtime.last_cycle().await,
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Start a manual cycle in the background; 409 if one is already running
pub async fn trigger_scan(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.runtime.try_acquire() {
        Ok(guard) => {
            let runtime = state.runtime.clone();
            tokio::spawn(async move {
                if let Err(e) = runtime.run_cycle(guard, TriggerSource::Manual).await {
                    debug!(error = %e, "HTTP: manual scan ended with error");
                }
            });
            info!("HTTP: manual scan started");
            (StatusCode::ACCEPTED, Json(json!({ "status": "started" })))
        }
        Err(e) => (
            StatusCode::CONFLICT,
            Json(json!({ "status": "busy", "error": e.to_string() })),
        ),
    }
}

/// Counts every request and logs server errors with their latency
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let route = format!("{} {}", request.method(), request.uri().path());

    let response = next.run(request).await;
    state.metrics.http_requests_total.inc();

    let status = response.status();
    if status.is_server_error() {
        error!(
            route = %route,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "HTTP: {} failed with {}",
            route,
            status
        );
    }
    response
}

pub fn create_router(state: AppState) -> Router {
    let tracing = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/scan", post(trigger_scan))
        .layer(
            ServiceBuilder::new()
                .layer(tracing)
                .layer(axum::middleware::from_fn_with_state(state.clone(), track_requests))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP: listening on 0.0.0.0:{} (/health, /metrics, POST /scan)", port);
    axum::serve(listener, app).await
}
