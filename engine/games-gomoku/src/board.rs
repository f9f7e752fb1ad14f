//! Board state and game rules.

use std::fmt;

use thiserror::Error;

use crate::{MAX_BOARD_SIZE, WIN_LENGTH};

/// Direction vectors: horizontal, vertical, diagonal \, diagonal /
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Errors raised by board construction, move application and format parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board size {0} is out of range (1..={max})", max = MAX_BOARD_SIZE)]
    InvalidSize(usize),

    #[error("Board must be {0}x{0}")]
    BadDimensions(usize),

    #[error("Board contains invalid values")]
    InvalidValue(i64),

    #[error("Board mixes the 0/1/2 and 0/1/-1 encodings")]
    MixedEncoding,

    #[error("Invalid player: {0}")]
    InvalidPlayer(i64),

    #[error("Action {action} is outside a board of {cells} cells")]
    ActionOutOfRange { action: usize, cells: usize },

    #[error("Cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}

/// A side in the game.
///
/// In canonical space `Black` is the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Cell value of this player's stones.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Player> {
        match sign {
            1 => Some(Player::Black),
            -1 => Some(Player::White),
            _ => None,
        }
    }
}

/// Result of a finished game, seen from the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    /// Scalar value for backup: +1, -1 or 0.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            GameOutcome::Win => 1.0,
            GameOutcome::Loss => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

/// Lossless fingerprint of a board.
///
/// Layout: one byte for the side length, then four cells per byte at two
/// bits each (`00` empty, `01` = +1, `10` = -1). Two keys are equal exactly
/// when the boards are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// N×N gomoku board in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// 0 = empty, 1 = black (or side to move), -1 = white (or opponent)
    cells: Vec<i8>,
}

impl Board {
    /// Create an empty board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build a board from row-major cells in internal encoding.
    pub fn from_cells(size: usize, cells: Vec<i8>) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidSize(size));
        }
        if cells.len() != size * size {
            return Err(BoardError::BadDimensions(size));
        }
        if let Some(&bad) = cells.iter().find(|&&c| !(-1..=1).contains(&c)) {
            return Err(BoardError::InvalidValue(bad as i64));
        }
        Ok(Self { size, cells })
    }

    /// Build a board from rows in internal encoding. The row count sets N.
    pub fn from_rows<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size {
                return Err(BoardError::BadDimensions(size));
            }
            cells.extend_from_slice(row);
        }
        Self::from_cells(size, cells)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of actions, N².
    #[inline]
    pub fn num_actions(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Cell value at (row, col). Panics when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[self.action(row, col)]
    }

    /// Linear action index for (row, col).
    #[inline]
    pub fn action(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// (row, col) for a linear action index.
    #[inline]
    pub fn coords(&self, action: usize) -> (usize, usize) {
        (action / self.size, action % self.size)
    }

    pub fn is_empty_cell(&self, action: usize) -> bool {
        self.cells.get(action) == Some(&0)
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Empty cells in ascending action order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Legality mask over all N² actions: true exactly on empty cells.
    pub fn legal_mask(&self) -> Vec<bool> {
        self.cells.iter().map(|&c| c == 0).collect()
    }

    /// Place a stone for `player` and hand the turn to the opponent.
    pub fn apply_move(&self, player: Player, action: usize) -> Result<(Board, Player), BoardError> {
        if action >= self.cells.len() {
            return Err(BoardError::ActionOutOfRange {
                action,
                cells: self.cells.len(),
            });
        }
        if self.cells[action] != 0 {
            let (row, col) = self.coords(action);
            return Err(BoardError::Occupied { row, col });
        }

        let mut next = self.clone();
        next.cells[action] = player.sign();
        Ok((next, player.opponent()))
    }

    /// View the board from `mover`'s side: every cell multiplied by its sign.
    pub fn canonical_form(&self, mover: Player) -> Board {
        match mover {
            Player::Black => self.clone(),
            Player::White => Board {
                size: self.size,
                cells: self.cells.iter().map(|&c| -c).collect(),
            },
        }
    }

    /// Number of contiguous `color` stones starting next to (row, col) in direction (dr, dc).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, color: i8) -> usize {
        let n = self.size as isize;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut count = 0;

        while r >= 0 && r < n && c >= 0 && c < n && self.cells[(r * n + c) as usize] == color {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Whether the stone at (row, col) is part of a run of five or more.
    pub fn check_win_at(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        let color = self.get(row, col);
        if color == 0 {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let forward = self.run_length(row, col, dr, dc, color);
            let backward = self.run_length(row, col, -dr, -dc, color);
            1 + forward + backward >= WIN_LENGTH
        })
    }

    /// Full-board scan for a run of five or more `player` stones.
    pub fn is_win(&self, player: Player) -> bool {
        let color = player.sign();
        self.cells.iter().enumerate().any(|(i, &c)| {
            let (row, col) = self.coords(i);
            c == color && self.check_win_at(row, col)
        })
    }

    /// Cells of one winning run for `player`, ordered along the line.
    pub fn winning_line(&self, player: Player) -> Option<Vec<(usize, usize)>> {
        let color = player.sign();

        for (i, &c) in self.cells.iter().enumerate() {
            if c != color {
                continue;
            }
            let (row, col) = self.coords(i);

            for &(dr, dc) in &DIRECTIONS {
                // Only start from the first stone of a run
                if self.run_length(row, col, -dr, -dc, color) > 0 {
                    continue;
                }
                let len = 1 + self.run_length(row, col, dr, dc, color);
                if len >= WIN_LENGTH {
                    let line = (0..len as isize)
                        .map(|k| {
                            (
                                (row as isize + dr * k) as usize,
                                (col as isize + dc * k) as usize,
                            )
                        })
                        .collect();
                    return Some(line);
                }
            }
        }
        None
    }

    /// Outcome for `mover`, or `None` while the game is still going.
    pub fn game_ended(&self, mover: Player) -> Option<GameOutcome> {
        if self.is_win(mover) {
            Some(GameOutcome::Win)
        } else if self.is_win(mover.opponent()) {
            Some(GameOutcome::Loss)
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn state_key(&self) -> StateKey {
        let mut bytes = Vec::with_capacity(1 + self.cells.len().div_ceil(4));
        bytes.push(self.size as u8);

        for chunk in self.cells.chunks(4) {
            let mut packed = 0u8;
            for (i, &c) in chunk.iter().enumerate() {
                let code = match c {
                    1 => 0b01,
                    -1 => 0b10,
                    _ => 0b00,
                };
                packed |= code << (2 * i);
            }
            bytes.push(packed);
        }

        StateKey(bytes.into_boxed_slice())
    }

    /// Rows in internal encoding.
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row
                .iter()
                .map(|&c| match c {
                    1 => 'X',
                    -1 => 'O',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
