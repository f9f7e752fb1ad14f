//! Gomoku move service
//!
//! HTTP server that answers "what should the bot play here?" with an
//! MCTS search guided by a neural network or a rule-based evaluator.
//! Endpoints:
//! - GET  /health   - Service status, active evaluator and board size
//! - POST /move     - Pick a move for the posted board
//! - GET  /metrics  - Prometheus metrics

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use engine_config::CentralConfig;
use mcts::Evaluator;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

mod error;
mod handlers;
mod metrics;
mod model;
mod types;

use handlers::{health, make_move, metrics_handler};
use model::{load_evaluator, log_evaluator, EvaluatorInfo};

/// Shared application state. Read-only after startup.
pub struct AppState {
    pub config: CentralConfig,
    /// Pure function from board to (policy, value); shared by all requests.
    pub evaluator: Arc<dyn Evaluator>,
    pub info: EvaluatorInfo,
}

/// Create the application router with the given state.
/// This is separated out for testing purposes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.web.allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/move", post(make_move))
        .route("/metrics", get(metrics_handler))
        .layer(cors)
        .with_state(state)
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parsed)
    }
}

/// Install the subscriber before config is read so config logging is
/// visible. Returns a handle for swapping in the configured level.
fn init_tracing() -> reload::Handle<EnvFilter, Registry> {
    let initial = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    handle
}

/// Creates a future that completes when a shutdown signal is received.
/// Handles Ctrl+C on all platforms.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_handle = init_tracing();

    // Load configuration from config.toml with env var overrides
    let config = engine_config::load_config();
    if std::env::var("RUST_LOG").is_err() {
        match EnvFilter::try_new(&config.common.log_level) {
            Ok(filter) => log_handle.reload(filter)?,
            Err(e) => warn!("Invalid log_level {:?}: {}", config.common.log_level, e),
        }
    }
    config.validate()?;
    if config.web.allowed_origins.is_empty() {
        warn!("No CORS origins configured, allowing any origin");
    }

    metrics::init_metrics();

    let (evaluator, info) = load_evaluator(&config.model)?;
    log_evaluator(&info, config.model.board_size);
    metrics::DEGRADED.set(info.degraded as i64);

    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = Arc::new(AppState {
        config,
        evaluator,
        info,
    });
    let app = create_app(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// ============================================================================
// Integration Tests
// ============================================================================
