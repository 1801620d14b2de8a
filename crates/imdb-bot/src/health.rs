//! Health check and metrics endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
    pub imdb_configured: bool,
    pub bot_username: Option<String>,
}

/// Metrics data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub inline_queries: u64,
    pub results_served: u64,
    pub details_rendered: u64,
    pub messages_received: u64,
    pub errors: u64,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<RwLock<Metrics>>,
    pub start_time: SystemTime,
    pub bot_username: Option<String>,
    pub imdb_configured: bool,
}

impl AppState {
    pub fn new(bot_username: Option<String>, imdb_configured: bool) -> Self {
        Self {
            metrics: Arc::new(RwLock::new(Metrics::default())),
            start_time: SystemTime::now(),
            bot_username,
            imdb_configured,
        }
    }

    pub async fn increment_inline_queries(&self) {
        self.metrics.write().await.inline_queries += 1;
    }

    pub async fn add_results_served(&self, count: usize) {
        self.metrics.write().await.results_served += count as u64;
    }

    pub async fn increment_details_rendered(&self) {
        self.metrics.write().await.details_rendered += 1;
    }

    pub async fn increment_messages_received(&self) {
        self.metrics.write().await.messages_received += 1;
    }

    pub async fn increment_errors(&self) {
        self.metrics.write().await.errors += 1;
    }
}

/// Health check endpoint handler
///
/// Always 200: a missing lookup endpoint degrades answers but the bot keeps
/// serving updates.
async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let uptime = state.start_time.elapsed().unwrap_or_default().as_secs();

    let status = if state.imdb_configured {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthStatus {
        status: status.to_string(),
        uptime_seconds: uptime,
        imdb_configured: state.imdb_configured,
        bot_username: state.bot_username.clone(),
    })
}

/// Metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> Json<Metrics> {
    let metrics = state.metrics.read().await;
    Json(metrics.clone())
}

/// Create health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/ready", get(ready_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Readiness check: lookups can actually be answered
async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.imdb_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Liveness check (process is alive)
async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Start health check server
pub async fn start_health_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Health check server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
