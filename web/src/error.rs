//! Errors returned by the move endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use games_gomoku::BoardError;
use mcts::SearchError;
use thiserror::Error;

use crate::metrics;
use crate::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Board(#[from] BoardError),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("Game is already over")]
    GameOver,

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Search task failed: {0}")]
    Task(String),
}

impl MoveError {
    pub fn status(&self) -> StatusCode {
        match self {
            MoveError::BadRequest(_)
            | MoveError::Board(_)
            | MoveError::InvalidDifficulty(_)
            | MoveError::GameOver => StatusCode::BAD_REQUEST,
            MoveError::Search(SearchError::GameOver(_) | SearchError::NoLegalMoves) => {
                StatusCode::BAD_REQUEST
            }
            MoveError::Search(_) | MoveError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label for the error counter.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::BadRequest(_) => "bad_request",
            MoveError::Board(_) => "invalid_board",
            MoveError::InvalidDifficulty(_) => "invalid_difficulty",
            MoveError::GameOver => "game_over",
            MoveError::Search(SearchError::Evaluator(_)) => "evaluator",
            MoveError::Search(_) => "search",
            MoveError::Task(_) => "task",
        }
    }
}

impl IntoResponse for MoveError {
    fn into_response(self) -> Response {
        let status = self.status();
        metrics::MOVE_ERRORS.with_label_values(&[self.kind()]).inc();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "Error calculating move: {}", self);
        } else {
            tracing::debug!(kind = self.kind(), "Rejected move request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
