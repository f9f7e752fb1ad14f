//! Five-in-a-row (gomoku) rules for the move service.
//!
//! The board is an N×N grid stored in row-major order. Each cell holds one of
//! three values: `0` for empty, `1` for black and `-1` for white. A player wins
//! with five or more stones in a row horizontally, vertically or diagonally
//! (overlines count).
//!
//! # Board Layout
//!
//! ```text
//! Row 0: [ 0][ 1][ 2] ... [N-1]
//! Row 1: [ N][N+1]    ...
//!  ...
//! ```
//!
//! An action is the linear cell index `row * N + col`.
//!
//! # Canonical Form
//!
//! Search works in canonical space, where the side to move is always `+1`.
//! [`Board::canonical_form`] multiplies every cell by the mover's sign, so
//! applying it twice with the same mover restores the original board.
//!
//! # Usage
//!
//! ```rust
//! use games_gomoku::{Board, Player};
//!
//! let board = Board::new(15).unwrap();
//! let (board, next) = board.apply_move(Player::Black, 7 * 15 + 7).unwrap();
//! assert_eq!(next, Player::White);
//! assert_eq!(board.legal_moves().len(), 224);
//! assert!(board.game_ended(next).is_none());
//! ```

mod board;
mod format;

pub use board::{Board, BoardError, GameOutcome, Player, StateKey};
pub use format::{detect_encoding, parse_board, parse_player, to_external_rows, Encoding};

/// Stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 32;

/// Standard gomoku board side.
pub const DEFAULT_BOARD_SIZE: usize = 15;

#[cfg(test)]
mod tests;
