//! Monte Carlo Tree Search (MCTS) over gomoku boards, AlphaZero style.
//!
//! # Overview
//!
//! Each simulation walks the table from the root:
//!
//! 1. **Selection**: at every known non-terminal state, follow the edge with
//!    the highest `Q + c_puct * P * sqrt(N(s)) / (1 + N(s,a))`
//! 2. **Expansion**: a state seen for the first time is either cached as
//!    terminal or evaluated once, storing masked and renormalized priors
//! 3. **Backup**: the leaf value is negated at each ply on the way back and
//!    folded into every Q(s,a) on the path as a running mean
//!
//! All states are kept in canonical form (side to move = +1) and addressed
//! by their [`StateKey`](games_gomoku::StateKey), so transpositions share
//! statistics.
//!
//! # Usage
//!
//! ```rust
//! use games_gomoku::{Board, Player};
//! use mcts::{decide_move, HeuristicEvaluator, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let board = Board::new(15).unwrap();
//! let evaluator = HeuristicEvaluator::new();
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = decide_move(&evaluator, &config, &board, Player::Black, &mut rng).unwrap();
//! assert!(board.is_empty_cell(result.selected.action));
//! ```
//!
//! # Evaluators
//!
//! - [`UniformEvaluator`]: flat policy, value 0
//! - [`HeuristicEvaluator`]: line-pattern scoring, no model needed
//! - `OnnxEvaluator` (feature `onnx`): neural network via ONNX Runtime

pub mod config;
pub mod evaluator;
pub mod heuristic;
pub mod node;
pub mod search;
pub mod select;
pub mod tree;

#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{EvalResult, Evaluator, EvaluatorError, UniformEvaluator};
pub use heuristic::{HeuristicEvaluator, PatternScore};
pub use node::{Edge, SearchNode};
pub use search::{visits_to_probs, MctsEngine, SearchError};
pub use select::{decide_move, select_move, SearchResult, SelectedMove};
pub use tree::{SearchTable, TableStats};

#[cfg(feature = "onnx")]
pub use onnx::OnnxEvaluator;
