//! Turning a search distribution into a concrete move.

use games_gomoku::{Board, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::warn;

use crate::config::MctsConfig;
use crate::evaluator::Evaluator;
use crate::search::{MctsEngine, SearchError};

/// The cell chosen for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedMove {
    pub row: usize,
    pub col: usize,
    pub action: usize,
    /// True when the distribution pointed at an occupied cell and a random
    /// empty cell was used instead.
    pub fallback: bool,
}

/// Outcome of one full move decision.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub selected: SelectedMove,
    /// Distribution over all N² actions.
    pub policy: Vec<f32>,
    /// Simulations actually run.
    pub simulations: u32,
    /// Distinct states in the table when the search finished.
    pub nodes: usize,
}

/// Pick the first maximum of `probs`, falling back to a uniformly random
/// empty cell if that cell is occupied on `board`.
pub fn select_move(
    board: &Board,
    probs: &[f32],
    rng: &mut ChaCha20Rng,
) -> Result<SelectedMove, SearchError> {
    let mut best = 0;
    for (action, &p) in probs.iter().enumerate() {
        if p > probs[best] {
            best = action;
        }
    }

    if best < board.num_actions() && board.is_empty_cell(best) {
        let (row, col) = board.coords(best);
        return Ok(SelectedMove {
            row,
            col,
            action: best,
            fallback: false,
        });
    }

    let empty = board.legal_moves();
    let &action = empty.choose(rng).ok_or(SearchError::NoLegalMoves)?;
    let (row, col) = board.coords(action);
    warn!(
        argmax = best,
        row, col, "Search picked an occupied cell, playing a random empty cell"
    );

    Ok(SelectedMove {
        row,
        col,
        action,
        fallback: true,
    })
}

/// Search `board` with `mover` to play and choose a move.
///
/// Runs a fresh engine so no statistics leak between requests.
pub fn decide_move<E: Evaluator + ?Sized>(
    evaluator: &E,
    config: &MctsConfig,
    board: &Board,
    mover: Player,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let canonical = board.canonical_form(mover);
    let mut engine = MctsEngine::new(evaluator, config.clone());

    let policy = engine.get_action_prob(
        &canonical,
        config.num_simulations,
        config.temperature,
        rng,
    )?;
    let selected = select_move(board, &policy, rng)?;

    Ok(SearchResult {
        selected,
        policy,
        simulations: engine.last_simulations(),
        nodes: engine.stats(&canonical).total_nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::UniformEvaluator;
    use crate::heuristic::HeuristicEvaluator;
    use rand::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(7)
    }

    #[test]
    fn test_select_argmax() {
        let board = Board::new(3).unwrap();
        let mut probs = vec![0.0; 9];
        probs[5] = 0.6;
        probs[2] = 0.4;

        let mv = select_move(&board, &probs, &mut rng()).unwrap();
        assert_eq!((mv.row, mv.col, mv.action), (1, 2, 5));
        assert!(!mv.fallback);
    }

    #[test]
    fn test_select_first_of_equal_maxima() {
        let board = Board::new(3).unwrap();
        let probs = vec![0.0, 0.5, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(select_move(&board, &probs, &mut rng()).unwrap().action, 1);
    }

    #[test]
    fn test_select_occupied_falls_back_to_empty() {
        let rows: Vec<Vec<i8>> = vec![vec![1, -1, 1], vec![-1, 0, 1], vec![1, -1, 0]];
        let board = Board::from_rows(&rows).unwrap();
        let mut probs = vec![0.0; 9];
        probs[0] = 1.0;

        let mv = select_move(&board, &probs, &mut rng()).unwrap();
        assert!(mv.fallback);
        assert!(mv.action == 4 || mv.action == 8);
        assert!(board.is_empty_cell(mv.action));
    }

    #[test]
    fn test_select_on_full_board_fails() {
        let rows: Vec<Vec<i8>> = vec![vec![1, -1], vec![-1, 1]];
        let board = Board::from_rows(&rows).unwrap();
        let result = select_move(&board, &[1.0, 0.0, 0.0, 0.0], &mut rng());
        assert!(matches!(result, Err(SearchError::NoLegalMoves)));
    }

    #[test]
    fn test_decide_move_as_white_completes_five() {
        // White (-1) has four on column 9 from row 2 to 5, capped at (1,9).
        let mut cells = vec![0i8; 225];
        for r in 2..6 {
            cells[r * 15 + 9] = -1;
        }
        for &(r, c) in &[(1, 9), (7, 7), (7, 8), (8, 8), (12, 1)] {
            cells[r * 15 + c] = 1;
        }
        let board = Board::from_cells(15, cells).unwrap();

        let evaluator = HeuristicEvaluator::new();
        let config = MctsConfig::for_testing().with_simulations(100);
        let result = decide_move(&evaluator, &config, &board, Player::White, &mut rng()).unwrap();

        assert_eq!((result.selected.row, result.selected.col), (6, 9));
        assert!(!result.selected.fallback);
        assert_eq!(result.simulations, 100);
        assert!(result.nodes > 1);
        assert_eq!(result.policy.len(), 225);
    }

    #[test]
    fn test_decide_move_leaves_board_untouched() {
        let board = Board::new(9).unwrap();
        let evaluator = UniformEvaluator::new();
        let config = MctsConfig::for_testing().with_simulations(20);

        let result = decide_move(&evaluator, &config, &board, Player::Black, &mut rng()).unwrap();
        assert!(board.is_empty_cell(result.selected.action));
        assert_eq!(board.stone_count(), 0);
    }

    #[test]
    fn test_decide_move_rejects_finished_game() {
        let mut cells = vec![0i8; 81];
        for c in 0..5 {
            cells[c] = 1;
        }
        let board = Board::from_cells(9, cells).unwrap();
        let evaluator = UniformEvaluator::new();

        let result = decide_move(
            &evaluator,
            &MctsConfig::for_testing(),
            &board,
            Player::White,
            &mut rng(),
        );
        assert!(matches!(result, Err(SearchError::GameOver(_))));
    }
}
