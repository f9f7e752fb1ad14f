//! Evaluator trait for position evaluation.
//!
//! The evaluator maps a canonical board (side to move = +1) to a policy over
//! all N² cells and a value for the side to move. It is a pure function from
//! the search's point of view: the engine never trains or owns it, it only
//! calls it once per newly expanded state.

use games_gomoku::Board;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid evaluator output: {0}")]
    InvalidOutput(String),

    #[error("Model error: {0}")]
    ModelError(String),
}

/// Result of evaluating a board.
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Policy: non-negative weights over all N² actions.
    /// Need not be normalized or masked; the engine does both.
    pub policy: Vec<f32>,

    /// Value estimate for the side to move.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

impl EvalResult {
    /// Check the evaluator contract: full-length finite non-negative policy
    /// and a finite value in [-1, 1].
    pub fn validate(&self, num_actions: usize) -> Result<(), EvaluatorError> {
        if self.policy.len() != num_actions {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy has {} entries, expected {}",
                self.policy.len(),
                num_actions
            )));
        }
        if let Some((i, p)) = self
            .policy
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy[{}] = {} is not a finite non-negative weight",
                i, p
            )));
        }
        if !self.value.is_finite() || !(-1.0..=1.0).contains(&self.value) {
            return Err(EvaluatorError::InvalidOutput(format!(
                "value {} is outside [-1, 1]",
                self.value
            )));
        }
        Ok(())
    }
}

/// Trait for position evaluators.
///
/// Implementations:
/// - [`UniformEvaluator`]: flat policy, neutral value
/// - [`HeuristicEvaluator`](crate::HeuristicEvaluator): line-pattern scoring
/// - `OnnxEvaluator` (feature `onnx`): neural network inference
pub trait Evaluator: Send + Sync {
    /// Evaluate a canonical board.
    fn evaluate(&self, board: &Board) -> Result<EvalResult, EvaluatorError>;

    /// Short identifier used in logs and health output.
    fn name(&self) -> &'static str;
}

/// Uniform evaluator that assigns equal probability to all legal moves.
/// Value is always 0.0 (neutral). Useful for testing MCTS without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, board: &Board) -> Result<EvalResult, EvaluatorError> {
        let mask = board.legal_mask();
        let num_legal = mask.iter().filter(|&&legal| legal).count();

        if num_legal == 0 {
            return Ok(EvalResult {
                policy: vec![0.0; mask.len()],
                value: 0.0,
            });
        }

        let prob = 1.0 / num_legal as f32;
        let policy = mask
            .iter()
            .map(|&legal| if legal { prob } else { 0.0 })
            .collect();

        Ok(EvalResult { policy, value: 0.0 })
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
