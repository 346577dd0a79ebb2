use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Parses `e2e4`, `e2-e4` or `e2 e4`.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let squares: String = text.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if squares.len() != 4 {
            return None;
        }
        Some(Self {
            from: Position::from_algebraic(&squares[..2])?,
            to: Position::from_algebraic(&squares[2..])?,
        })
    }
}

/// `<from>-<to>`, which is also the checkers move notation.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// An applied move as kept in a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub notation: String,
    pub capture: bool,
}
