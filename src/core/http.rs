//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::{ConfigPatch, ConfigStore, InMemoryConfigStore, ScannerSettings, StrategyConfig};
use crate::core::scanner::ScanOrchestrator;
use crate::metrics::Metrics;
use crate::models::scan::ScanResult;
use crate::services::yahoo::YahooCandleFetcher;

#[derive(Clone)]
pub struct AppState {
    pub config_store: Arc<dyn ConfigStore>,
    pub scanner: Arc<ScanOrchestrator>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
}

type ApiError = (StatusCode, Json<Value>);

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "uptime_seconds": uptime_seconds,
        "service": "nse-scanner"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

async fn get_settings(State(state): State<AppState>) -> Json<StrategyConfig> {
    Json(state.config_store.get().await)
}

fn settings_rejected(details: String) -> ApiError {
    error!(details = %details, "Settings update rejected");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Failed to update settings", "details": details })),
    )
}

async fn update_settings(
    State(state): State<AppState>,
    patch: Result<Json<ConfigPatch>, JsonRejection>,
) -> Result<Json<StrategyConfig>, ApiError> {
    let Json(patch) = patch.map_err(|e| settings_rejected(e.body_text()))?;
    state
        .config_store
        .set(patch)
        .await
        .map(Json)
        .map_err(|e| settings_rejected(e.to_string()))
}

async fn run_scan(State(state): State<AppState>) -> Result<Json<ScanResult>, ApiError> {
    let config = state.config_store.get().await;
    state.scanner.run_scan(&config).await.map(Json).map_err(|e| {
        error!(error = %e, "Scan failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Scan failed", "details": e.to_string() })),
        )
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/settings", get(get_settings).post(update_settings))
        .route("/api/scan", get(run_scan))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    settings: ScannerSettings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let fetcher = Arc::new(YahooCandleFetcher::with_base_url(settings.yahoo_base_url.clone()));
    let scanner = ScanOrchestrator::new(fetcher, settings.scan_plan()).with_metrics(metrics.clone());

    let state = AppState {
        config_store: Arc::new(InMemoryConfigStore::default()),
        scanner: Arc::new(scanner),
        metrics,
        start_time: Arc::new(Instant::now()),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?;

    info!(port = settings.port, "HTTP server listening on port {}", settings.port);
    info!(
        symbols = settings.symbols.len(),
        benchmark = %settings.benchmark_symbol,
        "API available at http://0.0.0.0:{}/api",
        settings.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
