//! Evaluator selection at startup.
//!
//! The configured model file is loaded once. When that fails the configured
//! fallback decides what happens: play with a heuristic or uniform evaluator
//! in degraded mode, or refuse to start.

use std::sync::Arc;

use anyhow::bail;
use engine_config::{Fallback, ModelConfig};
use mcts::{Evaluator, HeuristicEvaluator, UniformEvaluator};
use tracing::{info, warn};

/// What is serving moves, as reported by `/health`.
#[derive(Debug, Clone)]
pub struct EvaluatorInfo {
    /// "onnx", "heuristic" or "uniform"
    pub kind: &'static str,
    /// Model file name, or the evaluator kind when no model is loaded.
    pub model_id: String,
    /// True when a fallback evaluator replaced the model.
    pub degraded: bool,
    /// True when inference runs on an accelerator.
    pub accelerated: bool,
}

/// Load the configured model, falling back according to `config.fallback`.
pub fn load_evaluator(config: &ModelConfig) -> anyhow::Result<(Arc<dyn Evaluator>, EvaluatorInfo)> {
    match try_load_model(config) {
        Ok(loaded) => Ok(loaded),
        Err(reason) => fallback(config, &reason),
    }
}

#[cfg(feature = "onnx")]
fn try_load_model(config: &ModelConfig) -> Result<(Arc<dyn Evaluator>, EvaluatorInfo), String> {
    let path = config.model_file();
    if !path.exists() {
        return Err(format!("model file {} not found", path.display()));
    }

    let evaluator = mcts::OnnxEvaluator::load(&path, config.board_size, config.accelerator)
        .map_err(|e| e.to_string())?;
    let info = EvaluatorInfo {
        kind: evaluator.name(),
        model_id: config.filename.clone(),
        degraded: false,
        accelerated: evaluator.accelerated(),
    };
    Ok((Arc::new(evaluator), info))
}

#[cfg(not(feature = "onnx"))]
fn try_load_model(config: &ModelConfig) -> Result<(Arc<dyn Evaluator>, EvaluatorInfo), String> {
    Err(format!(
        "built without ONNX support, cannot load {}",
        config.model_file().display()
    ))
}

fn fallback(
    config: &ModelConfig,
    reason: &str,
) -> anyhow::Result<(Arc<dyn Evaluator>, EvaluatorInfo)> {
    let evaluator: Arc<dyn Evaluator> = match config.fallback {
        Fallback::Heuristic => Arc::new(HeuristicEvaluator::new()),
        Fallback::Uniform => Arc::new(UniformEvaluator::new()),
        Fallback::None => bail!("Failed to load model: {} (fallback = none)", reason),
    };

    warn!(
        reason,
        evaluator = evaluator.name(),
        "Model unavailable, serving moves in degraded mode"
    );

    let info = EvaluatorInfo {
        kind: evaluator.name(),
        model_id: evaluator.name().to_string(),
        degraded: true,
        accelerated: false,
    };
    Ok((evaluator, info))
}

/// Log the evaluator that will serve moves.
pub fn log_evaluator(info: &EvaluatorInfo, board_size: usize) {
    info!(
        evaluator = info.kind,
        model = %info.model_id,
        degraded = info.degraded,
        accelerated = info.accelerated,
        board_size,
        "Evaluator ready"
    );
}
