//! Rule-based evaluator built from line patterns.
//!
//! Every empty cell is scored by the runs it would extend for the side to
//! move (attack) and the runs it would cut for the opponent (defence), in all
//! four line directions. A run is weighted by its length and by how many of
//! its two ends stay open. The policy is the normalized cell scores; the value
//! compares the strongest attack with the strongest threat.
//!
//! This evaluator needs no model file and backs the service when the network
//! cannot be loaded.

use games_gomoku::{Board, WIN_LENGTH};

use crate::evaluator::{EvalResult, Evaluator, EvaluatorError};

/// Direction vectors: horizontal, vertical, diagonal \, diagonal /
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Weight of cutting an opponent run relative to building an own run.
const DEFENCE_WEIGHT: f32 = 0.9;

/// Scale of the score gap that maps to a value of about ±0.38.
const VALUE_SCALE: f32 = 2000.0;

/// Pattern weights.
pub struct PatternScore;

impl PatternScore {
    pub const FIVE: i32 = 100_000;
    pub const OPEN_FOUR: i32 = 10_000;
    pub const CLOSED_FOUR: i32 = 1_000;
    pub const OPEN_THREE: i32 = 1_000;
    pub const CLOSED_THREE: i32 = 100;
    pub const OPEN_TWO: i32 = 100;
    pub const CLOSED_TWO: i32 = 10;
    pub const OPEN_ONE: i32 = 10;
    pub const CLOSED_ONE: i32 = 1;

    /// Weight of a run of `length` stones with `open_ends` empty ends.
    pub fn of(length: usize, open_ends: u8) -> i32 {
        if length >= WIN_LENGTH {
            return Self::FIVE;
        }
        match (length, open_ends) {
            (4, 2) => Self::OPEN_FOUR,
            (4, 1) => Self::CLOSED_FOUR,
            (3, 2) => Self::OPEN_THREE,
            (3, 1) => Self::CLOSED_THREE,
            (2, 2) => Self::OPEN_TWO,
            (2, 1) => Self::CLOSED_TWO,
            (1, 2) => Self::OPEN_ONE,
            (1, 1) => Self::CLOSED_ONE,
            _ => 0,
        }
    }
}

/// Scores of one empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CellScore {
    attack: i32,
    defence: i32,
}

/// Pattern-scoring evaluator.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Run length and open ends if `color` played at the empty cell (row, col).
    fn line_pattern(
        board: &Board,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        color: i8,
    ) -> (usize, u8) {
        let n = board.size() as isize;
        let stone_at = |r: isize, c: isize| {
            (r >= 0 && r < n && c >= 0 && c < n).then(|| board.get(r as usize, c as usize))
        };
        let mut length = 1;
        let mut open_ends = 0;

        for sign in [1isize, -1] {
            let mut r = row as isize + dr * sign;
            let mut c = col as isize + dc * sign;

            while stone_at(r, c) == Some(color) {
                length += 1;
                r += dr * sign;
                c += dc * sign;
            }
            if stone_at(r, c) == Some(0) {
                open_ends += 1;
            }
        }

        (length, open_ends)
    }

    fn score_cell(board: &Board, row: usize, col: usize) -> CellScore {
        let mut score = CellScore::default();
        for &(dr, dc) in &DIRECTIONS {
            let (len, open) = Self::line_pattern(board, row, col, dr, dc, 1);
            score.attack += PatternScore::of(len, open);

            let (len, open) = Self::line_pattern(board, row, col, dr, dc, -1);
            score.defence += PatternScore::of(len, open);
        }
        score
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board) -> Result<EvalResult, EvaluatorError> {
        let mut policy = vec![0.0f32; board.num_actions()];
        let mut best_attack = 0;
        let mut best_threat = 0;
        let mut own_fives = 0;
        let mut opponent_fives = 0;

        for action in board.legal_moves() {
            let (row, col) = board.coords(action);
            let score = Self::score_cell(board, row, col);

            policy[action] = score.attack as f32 + DEFENCE_WEIGHT * score.defence as f32;
            best_attack = best_attack.max(score.attack);
            best_threat = best_threat.max(score.defence);
            if score.attack >= PatternScore::FIVE {
                own_fives += 1;
            }
            if score.defence >= PatternScore::FIVE {
                opponent_fives += 1;
            }
        }

        let total: f32 = policy.iter().sum();
        if total > 0.0 {
            for p in &mut policy {
                *p /= total;
            }
        }

        let value = if own_fives > 0 {
            1.0
        } else if opponent_fives >= 2 {
            -1.0
        } else {
            ((best_attack - best_threat) as f32 / VALUE_SCALE).tanh() * 0.5
        };

        Ok(EvalResult { policy, value })
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
