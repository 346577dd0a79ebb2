use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: u8 = 8;

/// A square on the 8x8 grid. Row 0 is the back rank of the side that starts
/// at the top (black in both games), so rank = 8 - row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8, // 0-7, top to bottom
    pub col: u8, // 0-7, a-h
}

impl Position {
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Square reached by stepping `(dr, dc)` from here, if it is still on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Self> {
        Self::new(self.row as i32 + dr, self.col as i32 + dc)
    }

    /// Dark squares are the only playable squares in checkers.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank(self) -> u8 {
        BOARD_SIZE - self.row
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }

        Some(Self {
            row: BOARD_SIZE - (rank as u8 - b'0'),
            col: file as u8 - b'a',
        })
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank())
    }
}
