//! Move endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use games_gomoku::{parse_board, parse_player};
use mcts::{decide_move, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::error::MoveError;
use crate::metrics;
use crate::types::{MoveRequest, MoveResponse};
use crate::AppState;

/// Pick a move for `currentPlayer` on the posted board.
///
/// Input is fully validated before any search runs. The search itself runs
/// on the blocking pool with a fresh engine per request.
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, MoveError> {
    let Json(req) = payload.map_err(|e| MoveError::BadRequest(e.body_text()))?;

    let board = parse_board(&req.board, state.config.model.board_size)?;
    let mover = parse_player(req.current_player)?;
    let simulations = state
        .config
        .difficulty
        .simulations(&req.difficulty)
        .ok_or_else(|| MoveError::InvalidDifficulty(req.difficulty.clone()))?;

    if board.game_ended(mover).is_some() {
        return Err(MoveError::GameOver);
    }

    let search = &state.config.mcts;
    let config = MctsConfig::for_play()
        .with_simulations(simulations)
        .with_c_puct(search.c_puct)
        .with_temperature(search.temperature)
        .with_time_budget(search.time_budget());
    let mut rng = match search.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let evaluator = Arc::clone(&state.evaluator);
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        decide_move(evaluator.as_ref(), &config, &board, mover, &mut rng)
    })
    .await
    .map_err(|e| MoveError::Task(e.to_string()))??;
    let elapsed = started.elapsed();

    metrics::SEARCH_SECONDS.observe(elapsed.as_secs_f64());
    metrics::SIMULATIONS.inc_by(result.simulations as u64);
    metrics::MOVES_SERVED.inc();
    if result.selected.fallback {
        metrics::SELECTOR_FALLBACKS.inc();
    }

    info!(
        row = result.selected.row,
        col = result.selected.col,
        player = ?mover,
        difficulty = %req.difficulty,
        simulations = result.simulations,
        nodes = result.nodes,
        elapsed_ms = elapsed.as_millis() as u64,
        "Move served"
    );

    Ok(Json(MoveResponse {
        x: result.selected.row,
        y: result.selected.col,
    }))
}
