//! Request types for the web API.

use serde::Deserialize;

/// Request for the next move.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// N×N grid in 0/1/2 or 0/1/-1 encoding.
    pub board: Vec<Vec<i64>>,
    /// Side to move: 1 for black, 2 or -1 for white.
    #[serde(default = "default_player")]
    pub current_player: i64,
    /// "easy", "medium" or "hard"
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_player() -> i64 {
    1
}

fn default_difficulty() -> String {
    "medium".to_string()
}
