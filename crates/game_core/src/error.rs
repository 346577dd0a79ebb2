//! Error types shared by both rule engines.

use crate::Position;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// The move is not among the legal moves of the side to move.
    #[error("invalid move {from} -> {to}: {reason}")]
    InvalidMove {
        from: Position,
        to: Position,
        reason: &'static str,
    },

    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    /// A caller-supplied board has the wrong shape or impossible contents.
    #[error("malformed board: {0}")]
    MalformedBoard(String),

    #[error("unknown piece code '{0}'")]
    UnknownPiece(String),
}

pub type GameResult<T> = Result<T, GameError>;
