// Rule engines for chess and checkers
pub mod board;
pub mod checkers;
pub mod chess;
pub mod error;
pub mod moves;
pub mod piece;
pub mod position;
pub mod snapshot;

// Re-export main types for convenience
pub use board::{Board, BoardSnapshot};
pub use checkers::{CaptureRule, CheckersBoard, CheckersGame, CheckersStatus};
pub use chess::{ChessBoard, ChessGame, ChessStatus};
pub use error::{GameError, GameResult};
pub use moves::{Move, MoveRecord};
pub use piece::{Checker, CheckerKind, Color, Piece, PieceCode, PieceType};
pub use position::{Position, BOARD_SIZE};
pub use snapshot::{GameSnapshot, MoveOutcome};
