//! ONNX Runtime evaluator for neural network inference.
//!
//! # Model Format
//!
//! The ONNX model is expected to have:
//! - Input: "board" - shape (1, N, N) float32, canonical board (mover = +1)
//! - Output: "policy_logits" - shape (1, N²) float32
//! - Output: "value" - shape (1, 1) float32
//!
//! Logits are turned into a distribution with a plain softmax over all N²
//! cells; masking of occupied cells is left to the search.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use games_gomoku::Board;
use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
use ort::{session::Session, value::Value};
use tracing::{debug, info, warn};

use crate::evaluator::{EvalResult, Evaluator, EvaluatorError};

/// ONNX Runtime evaluator for a single board size.
///
/// Uses a Mutex internally because `Session::run` requires `&mut self`,
/// but the `Evaluator` trait uses `&self` for thread-safe sharing.
pub struct OnnxEvaluator {
    session: Mutex<Session>,
    board_size: usize,
    accelerated: bool,
    inference_count: AtomicU64,
    total_inference_time_us: AtomicU64,
}

impl std::fmt::Debug for OnnxEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEvaluator")
            .field("board_size", &self.board_size)
            .field("accelerated", &self.accelerated)
            .finish_non_exhaustive()
    }
}

impl OnnxEvaluator {
    /// Load a model for `board_size`×`board_size` boards.
    ///
    /// With `accelerator` set the CUDA provider is registered; ONNX Runtime
    /// falls back to CPU when it is unavailable.
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        board_size: usize,
        accelerator: bool,
    ) -> Result<Self, EvaluatorError> {
        let model_path = model_path.as_ref();
        let mut builder = Session::builder()
            .map_err(|e| {
                EvaluatorError::ModelError(format!("Failed to create session builder: {}", e))
            })?
            .with_intra_threads(4)
            .map_err(|e| {
                EvaluatorError::ModelError(format!("Failed to set intra threads: {}", e))
            })?;

        let mut accelerated = false;
        if accelerator {
            let cuda = CUDAExecutionProvider::default();
            accelerated = cuda.is_available().unwrap_or(false);
            if !accelerated {
                warn!("CUDA requested but not available, running inference on CPU");
            }
            builder = builder
                .with_execution_providers([cuda.build()])
                .map_err(|e| {
                    EvaluatorError::ModelError(format!("Failed to register CUDA provider: {}", e))
                })?;
        }

        let session = builder
            .commit_from_file(model_path)
            .map_err(|e| EvaluatorError::ModelError(format!("Failed to load model: {}", e)))?;

        info!(
            path = %model_path.display(),
            board_size,
            accelerated,
            "Loaded ONNX model"
        );

        Ok(Self {
            session: Mutex::new(session),
            board_size,
            accelerated,
            inference_count: AtomicU64::new(0),
            total_inference_time_us: AtomicU64::new(0),
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Whether inference runs on the CUDA provider.
    pub fn accelerated(&self) -> bool {
        self.accelerated
    }

    pub fn inference_count(&self) -> u64 {
        self.inference_count.load(Ordering::Relaxed)
    }

    /// Numerically stable softmax.
    fn softmax(logits: &[f32]) -> Vec<f32> {
        let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if !max_logit.is_finite() {
            return vec![0.0; logits.len()];
        }

        let mut exp_values: Vec<f32> = logits.iter().map(|&l| (l - max_logit).exp()).collect();
        let exp_sum: f32 = exp_values.iter().sum();
        if exp_sum > 0.0 {
            for v in &mut exp_values {
                *v /= exp_sum;
            }
        }
        exp_values
    }
}

impl Evaluator for OnnxEvaluator {
    fn evaluate(&self, board: &Board) -> Result<EvalResult, EvaluatorError> {
        let n = self.board_size;
        if board.size() != n {
            return Err(EvaluatorError::EvaluationFailed(format!(
                "Model expects a {}x{} board, got {}x{}",
                n,
                n,
                board.size(),
                board.size()
            )));
        }

        let input: Vec<f32> = board.cells().iter().map(|&c| c as f32).collect();
        let input_array = ndarray::Array3::from_shape_vec((1, n, n), input).map_err(|e| {
            EvaluatorError::EvaluationFailed(format!("Failed to create input array: {}", e))
        })?;
        let input_value = Value::from_array(input_array).map_err(|e| {
            EvaluatorError::ModelError(format!("Failed to create input tensor: {}", e))
        })?;

        // Extract all data inside the lock scope
        let inference_start = Instant::now();
        let (policy_logits, value) = {
            let mut session = self.session.lock().map_err(|e| {
                EvaluatorError::EvaluationFailed(format!("Failed to acquire session lock: {}", e))
            })?;
            let outputs = session
                .run(ort::inputs!["board" => input_value])
                .map_err(|e| {
                    EvaluatorError::EvaluationFailed(format!("Inference failed: {}", e))
                })?;

            let policy_output = outputs.get("policy_logits").ok_or_else(|| {
                EvaluatorError::ModelError("Missing policy_logits output".to_string())
            })?;
            let (_shape, policy_data) = policy_output.try_extract_tensor::<f32>().map_err(|e| {
                EvaluatorError::ModelError(format!("Failed to extract policy tensor: {}", e))
            })?;
            let policy_logits: Vec<f32> = policy_data.to_vec();

            let value_output = outputs
                .get("value")
                .ok_or_else(|| EvaluatorError::ModelError("Missing value output".to_string()))?;
            let (_shape, value_data) = value_output.try_extract_tensor::<f32>().map_err(|e| {
                EvaluatorError::ModelError(format!("Failed to extract value tensor: {}", e))
            })?;
            let value = value_data.first().copied().ok_or_else(|| {
                EvaluatorError::InvalidOutput("Empty value tensor".to_string())
            })?;

            (policy_logits, value)
        };

        if policy_logits.len() != n * n {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy_logits has {} entries, expected {}",
                policy_logits.len(),
                n * n
            )));
        }

        let inference_time_us = inference_start.elapsed().as_micros() as u64;
        let total_us = self
            .total_inference_time_us
            .fetch_add(inference_time_us, Ordering::Relaxed)
            + inference_time_us;
        let count = self.inference_count.fetch_add(1, Ordering::Relaxed) + 1;

        #[allow(clippy::manual_is_multiple_of)]
        if count % 10_000 == 0 {
            debug!(
                "ONNX inference stats: {} calls, avg {:.2}ms per call",
                count,
                (total_us / count) as f64 / 1000.0
            );
        }

        Ok(EvalResult {
            policy: Self::softmax(&policy_logits),
            value: value.clamp(-1.0, 1.0),
        })
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
