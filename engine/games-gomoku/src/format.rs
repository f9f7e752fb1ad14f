//! Conversion between the wire encodings and the internal board.
//!
//! Clients send boards in one of two encodings:
//! - external: `0` empty, `1` black, `2` white
//! - internal: `0` empty, `1` black, `-1` white
//!
//! Both are accepted. A board that contains both `2` and `-1` is rejected.

use crate::board::{Board, BoardError, Player};

/// Cell encoding detected on an incoming board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// 0/1/-1
    Internal,
    /// 0/1/2
    External,
}

/// Work out which encoding a board uses.
///
/// A board with only 0s and 1s is reported as internal.
pub fn detect_encoding(rows: &[Vec<i64>]) -> Result<Encoding, BoardError> {
    let mut has_two = false;
    let mut has_minus_one = false;

    for &v in rows.iter().flatten() {
        match v {
            0 | 1 => {}
            2 => has_two = true,
            -1 => has_minus_one = true,
            other => return Err(BoardError::InvalidValue(other)),
        }
    }

    match (has_two, has_minus_one) {
        (true, true) => Err(BoardError::MixedEncoding),
        (true, false) => Ok(Encoding::External),
        _ => Ok(Encoding::Internal),
    }
}

/// Validate an incoming N×N board and convert it to internal encoding.
pub fn parse_board(rows: &[Vec<i64>], expected_size: usize) -> Result<Board, BoardError> {
    if rows.len() != expected_size || rows.iter().any(|r| r.len() != expected_size) {
        return Err(BoardError::BadDimensions(expected_size));
    }

    let encoding = detect_encoding(rows)?;
    let cells = rows
        .iter()
        .flatten()
        .map(|&v| match (encoding, v) {
            (Encoding::External, 2) => -1,
            (_, v) => v as i8,
        })
        .collect();

    Board::from_cells(expected_size, cells)
}

/// Parse the side to move: `1` is black, `-1` or `2` is white.
pub fn parse_player(value: i64) -> Result<Player, BoardError> {
    match value {
        1 => Ok(Player::Black),
        -1 | 2 => Ok(Player::White),
        other => Err(BoardError::InvalidPlayer(other)),
    }
}

/// Rows in external 0/1/2 encoding, for echoing a board back to clients.
pub fn to_external_rows(board: &Board) -> Vec<Vec<i64>> {
    board
        .to_rows()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|c| match c {
                    -1 => 2,
                    c => c as i64,
                })
                .collect()
        })
        .collect()
}
