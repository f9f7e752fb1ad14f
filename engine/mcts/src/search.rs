//! MCTS search implementation.
//!
//! Each simulation walks from the root down the table, picking the edge with
//! the highest UCB score at every internal node, until it reaches either a
//! terminal state or a state it has never seen. A new state is expanded with
//! one evaluator call; its value is then backed up along the path, negated at
//! every ply because the side to move alternates.
//!
//! The walk keeps an explicit stack of `(state, edge)` frames instead of
//! recursing, so depth is bounded by the number of empty cells without
//! touching the call stack.

use std::time::Instant;

use games_gomoku::{Board, BoardError, GameOutcome, Player, StateKey};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::{Edge, SearchNode};
use crate::tree::{SearchTable, TableStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Number of simulations must be at least 1")]
    InvalidSimulationCount,

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("Rules error: {0}")]
    Rules(#[from] BoardError),

    #[error("Game is already over ({0:?} for the side to move)")]
    GameOver(GameOutcome),

    #[error("Root has no recorded visits")]
    NoVisits,

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search path node missing from table")]
    MissingNode,
}

/// Monte Carlo Tree Search engine.
///
/// Owns every statistic it gathers. One engine serves one move decision at a
/// time; call [`MctsEngine::reset`] before reusing it for an unrelated
/// position.
pub struct MctsEngine<'a, E: Evaluator + ?Sized> {
    evaluator: &'a E,
    config: MctsConfig,
    table: SearchTable,
    last_simulations: u32,
}

impl<'a, E: Evaluator + ?Sized> MctsEngine<'a, E> {
    pub fn new(evaluator: &'a E, config: MctsConfig) -> Self {
        Self {
            evaluator,
            config,
            table: SearchTable::new(),
            last_simulations: 0,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Forget all statistics.
    pub fn reset(&mut self) {
        self.table.clear();
        self.last_simulations = 0;
    }

    /// Simulations completed by the last [`get_action_prob`](Self::get_action_prob) call.
    pub fn last_simulations(&self) -> u32 {
        self.last_simulations
    }

    /// Statistics for a canonical board, if it has been visited.
    pub fn node(&self, canonical: &Board) -> Option<&SearchNode> {
        self.table.get(&canonical.state_key())
    }

    /// N(root, a) for every action of a canonical root.
    pub fn root_visit_counts(&self, canonical: &Board) -> Vec<u32> {
        match self.node(canonical) {
            Some(node) => node.visit_counts(canonical.num_actions()),
            None => vec![0; canonical.num_actions()],
        }
    }

    pub fn stats(&self, canonical: &Board) -> TableStats {
        self.table.stats(&canonical.state_key())
    }

    /// Run one simulation from `canonical` and return its value for the side
    /// to move there.
    pub fn simulate(&mut self, canonical: &Board) -> Result<f32, SearchError> {
        let mut path: Vec<(StateKey, usize)> = Vec::new();
        let mut board = canonical.clone();

        let value = loop {
            let key = board.state_key();

            let Some(node) = self.table.get(&key) else {
                // First visit: cache the outcome, or expand with one evaluation
                if let Some(outcome) = board.game_ended(Player::Black) {
                    self.table.insert(key, SearchNode::terminal(outcome));
                    break outcome.value();
                }
                break self.expand(&board, key)?;
            };

            if let Some(outcome) = node.terminal {
                break outcome.value();
            }

            let index = node
                .select_edge(self.config.c_puct)
                .ok_or(SearchError::NoLegalMoves)?;
            let action = node.edges[index].action;

            let (next, next_player) = board.apply_move(Player::Black, action)?;
            board = next.canonical_form(next_player);
            path.push((key, index));
        };

        self.backup(path, value)
    }

    /// Propagate a leaf value up `path`, flipping sign at each ply.
    /// Every node on the path must already be in the table.
    fn backup(
        &mut self,
        mut path: Vec<(StateKey, usize)>,
        mut value: f32,
    ) -> Result<f32, SearchError> {
        let depth = path.len();
        while let Some((key, index)) = path.pop() {
            value = -value;
            let node = self.table.get_mut(&key).ok_or(SearchError::MissingNode)?;
            node.record(index, value);
        }

        trace!(depth, value, "MCTS simulation complete");
        Ok(value)
    }

    /// Evaluate a new non-terminal state, store its masked priors and return
    /// the evaluator's value.
    fn expand(&mut self, board: &Board, key: StateKey) -> Result<f32, SearchError> {
        let eval = self.evaluator.evaluate(board)?;
        eval.validate(board.num_actions())?;

        let legal = board.legal_moves();
        let mass: f32 = legal.iter().map(|&a| eval.policy[a]).sum();

        let edges: Vec<Edge> = if mass > 0.0 {
            legal
                .iter()
                .map(|&a| Edge::new(a, eval.policy[a] / mass))
                .collect()
        } else {
            warn!(
                evaluator = self.evaluator.name(),
                legal_moves = legal.len(),
                "Evaluator gave zero mass to every legal move, using uniform priors"
            );
            let prior = 1.0 / legal.len() as f32;
            legal.iter().map(|&a| Edge::new(a, prior)).collect()
        };

        self.table.insert(key, SearchNode::expanded(edges));
        Ok(eval.value)
    }

    /// Run simulations from `canonical` and turn the root visit counts into a
    /// distribution over all N² actions.
    ///
    /// The root is expanded first if it is new; that evaluation is not
    /// counted as a simulation, so every simulation adds one root visit.
    /// With a configured time budget the loop may stop after fewer than
    /// `num_simulations`, but never before the first one.
    pub fn get_action_prob(
        &mut self,
        canonical: &Board,
        num_simulations: u32,
        temperature: f32,
        rng: &mut ChaCha20Rng,
    ) -> Result<Vec<f32>, SearchError> {
        if num_simulations == 0 {
            return Err(SearchError::InvalidSimulationCount);
        }
        if let Some(outcome) = canonical.game_ended(Player::Black) {
            return Err(SearchError::GameOver(outcome));
        }

        let root_key = canonical.state_key();
        if !self.table.contains(&root_key) {
            self.expand(canonical, root_key)?;
        }

        let started = Instant::now();
        let mut completed = 0;
        for _ in 0..num_simulations {
            self.simulate(canonical)?;
            completed += 1;

            if let Some(budget) = self.config.time_budget {
                if completed < num_simulations && started.elapsed() >= budget {
                    debug!(
                        completed,
                        requested = num_simulations,
                        budget_ms = budget.as_millis() as u64,
                        "Time budget reached, stopping search early"
                    );
                    break;
                }
            }
        }
        self.last_simulations = completed;

        let counts = self.root_visit_counts(canonical);
        let probs = visits_to_probs(&counts, temperature, rng)?;

        debug!(
            simulations = completed,
            nodes = self.table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "MCTS search complete"
        );
        Ok(probs)
    }
}

/// Convert visit counts to a distribution.
///
/// Temperature 0 gives a one-hot vector on a most-visited action, with ties
/// broken uniformly at random. Otherwise each count is raised to
/// `1 / temperature` and the result normalized.
pub fn visits_to_probs(
    counts: &[u32],
    temperature: f32,
    rng: &mut ChaCha20Rng,
) -> Result<Vec<f32>, SearchError> {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Err(SearchError::NoVisits);
    }

    let mut probs = vec![0.0; counts.len()];

    if temperature <= 0.0 {
        let best: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == max)
            .map(|(a, _)| a)
            .collect();
        let pick = best[rng.gen_range(0..best.len())];
        probs[pick] = 1.0;
        return Ok(probs);
    }

    // Scaling by the max count first keeps small temperatures from overflowing
    let exponent = 1.0 / temperature as f64;
    let weights: Vec<f64> = counts
        .iter()
        .map(|&c| (c as f64 / max as f64).powf(exponent))
        .collect();
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(SearchError::NoVisits);
    }

    for (p, w) in probs.iter_mut().zip(&weights) {
        *p = (w / total) as f32;
    }
    Ok(probs)
}
