use std::fmt;
use std::str::FromStr;

use crate::error::{GameError, GameResult};
use crate::piece::{Color, PieceCode};
use crate::position::{Position, BOARD_SIZE};

/// The board shape exchanged with callers: 8 rows of 8 cells, each either
/// `null` or a one-letter piece code.
pub type BoardSnapshot = Vec<Vec<Option<String>>>;

const EMPTY_CELL: char = '.';

/// An 8x8 grid of optional pieces, row-major with row 0 at the top.
///
/// Boards are small `Copy` values, so simulating a move is a plain copy
/// followed by a few cell writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board<P> {
    cells: [[Option<P>; 8]; 8],
}

impl<P: PieceCode> Default for Board<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: PieceCode> Board<P> {
    pub fn empty() -> Self {
        Self { cells: [[None; 8]; 8] }
    }

    pub fn get(&self, pos: Position) -> Option<P> {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Position, piece: Option<P>) {
        self.cells[pos.row as usize][pos.col as usize] = piece;
    }

    pub fn place(&mut self, pos: Position, piece: P) {
        self.set(pos, Some(piece));
    }

    pub fn take(&mut self, pos: Position) -> Option<P> {
        self.cells[pos.row as usize][pos.col as usize].take()
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn is_color_at(&self, pos: Position, color: Color) -> bool {
        self.get(pos).map_or(false, |p| p.color() == color)
    }

    /// All occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, P)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color() == color).count()
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(|p| p.code().to_string())).collect())
            .collect()
    }

    /// Parses a caller-supplied snapshot, checking its shape and piece codes.
    pub fn from_snapshot(snapshot: &[Vec<Option<String>>]) -> GameResult<Self> {
        if snapshot.len() != BOARD_SIZE as usize {
            return Err(GameError::MalformedBoard(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                snapshot.len()
            )));
        }

        let mut board = Self::empty();
        for (row, cells) in snapshot.iter().enumerate() {
            if cells.len() != BOARD_SIZE as usize {
                return Err(GameError::MalformedBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    BOARD_SIZE
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                let Some(code) = cell.as_deref() else { continue };
                let mut chars = code.chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(c), None) => P::from_code(c),
                    _ => None,
                }
                .ok_or_else(|| GameError::UnknownPiece(code.to_string()))?;
                board.cells[row][col] = Some(piece);
            }
        }
        Ok(board)
    }
}

impl<P: PieceCode> fmt::Display for Board<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.map_or(EMPTY_CELL, |p| p.code())).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Compact text form: eight lines of eight characters, `.` for an empty
/// square. Blank lines and surrounding whitespace are ignored.
impl<P: PieceCode> FromStr for Board<P> {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<Option<String>>> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| (c != EMPTY_CELL).then(|| c.to_string()))
                    .collect()
            })
            .collect();
        Self::from_snapshot(&rows)
    }
}
