//! Response types for the web API.

use serde::{Deserialize, Serialize};

/// Chosen move. `x` is the row, `y` the column.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveResponse {
    pub x: usize,
    pub y: usize,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Model file name, or the fallback evaluator's name.
    pub model: String,
    pub version: String,
    pub board_size: usize,
    /// Whether inference runs on an accelerator.
    pub cuda: bool,
    /// "onnx", "heuristic" or "uniform"
    pub evaluator: String,
    pub degraded: bool,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
