//! Prometheus metrics for the move service.
//!
//! This module provides metrics for monitoring move latency, search effort,
//! request failures and whether the service runs on a fallback evaluator.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ========== Moves ==========

    /// Moves successfully returned to clients
    pub static ref MOVES_SERVED: IntCounter = IntCounter::with_opts(
        Opts::new("gomoku_moves_served_total", "Moves successfully returned to clients")
    ).unwrap();

    /// Failed move requests by error kind
    pub static ref MOVE_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new("gomoku_move_errors_total", "Failed move requests by error kind"),
        &["kind"]
    ).unwrap();

    /// Moves where the search pointed at an occupied cell
    pub static ref SELECTOR_FALLBACKS: IntCounter = IntCounter::with_opts(
        Opts::new("gomoku_selector_fallbacks_total", "Moves replaced by a random empty cell")
    ).unwrap();

    // ========== Search ==========

    /// Wall-clock time of one move decision
    pub static ref SEARCH_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("gomoku_search_seconds", "Time to compute one move")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0])
    ).unwrap();

    /// Simulations run across all searches
    pub static ref SIMULATIONS: IntCounter = IntCounter::with_opts(
        Opts::new("gomoku_simulations_total", "MCTS simulations run across all searches")
    ).unwrap();

    // ========== Evaluator Status ==========

    /// Whether a fallback evaluator is serving moves (0/1)
    pub static ref DEGRADED: IntGauge = IntGauge::with_opts(
        Opts::new("gomoku_evaluator_degraded", "Whether a fallback evaluator is in use (0/1)")
    ).unwrap();
}

static INIT: Once = Once::new();

/// Initialize and register all metrics with the registry.
/// Safe to call multiple times - only initializes once.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY.register(Box::new(MOVES_SERVED.clone())).unwrap();
        REGISTRY.register(Box::new(MOVE_ERRORS.clone())).unwrap();
        REGISTRY
            .register(Box::new(SELECTOR_FALLBACKS.clone()))
            .unwrap();
        REGISTRY.register(Box::new(SEARCH_SECONDS.clone())).unwrap();
        REGISTRY.register(Box::new(SIMULATIONS.clone())).unwrap();
        REGISTRY.register(Box::new(DEGRADED.clone())).unwrap();
    });
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
