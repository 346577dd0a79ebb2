//! Serializable views of a game for the request/response boundary.

use serde::{Deserialize, Serialize};

use crate::board::BoardSnapshot;
use crate::checkers::{CheckersGame, CheckersStatus};
use crate::chess::{ChessGame, ChessStatus};
use crate::moves::MoveRecord;
use crate::piece::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot<S> {
    pub board: BoardSnapshot,
    pub current_player: Color,
    pub status: S,
}

impl From<&ChessGame> for GameSnapshot<ChessStatus> {
    fn from(game: &ChessGame) -> Self {
        Self {
            board: game.board().to_snapshot(),
            current_player: game.current_player(),
            status: game.status(),
        }
    }
}

impl From<&CheckersGame> for GameSnapshot<CheckersStatus> {
    fn from(game: &CheckersGame) -> Self {
        Self {
            board: game.board().to_snapshot(),
            current_player: game.current_player(),
            status: game.status(),
        }
    }
}

/// The state after an applied move, together with the move's notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome<S> {
    #[serde(flatten)]
    pub state: GameSnapshot<S>,
    pub notation: String,
}

impl<S> MoveOutcome<S> {
    pub fn new(state: GameSnapshot<S>, record: &MoveRecord) -> Self {
        Self {
            state,
            notation: record.notation.clone(),
        }
    }
}
