//! Request-level operations over serializable game state.
//!
//! Every call rebuilds a fresh engine from the snapshot it is given, so no
//! state is shared between calls. The stored status in an incoming snapshot
//! is ignored and derived again from the board.

use game_core::{
    CaptureRule, CheckersGame, CheckersStatus, ChessGame, ChessStatus, GameError, GameResult,
    GameSnapshot, Move, MoveOutcome, MoveRecord, Position,
};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::ai::{AiConfig, CheckersAI, ChessAI};

pub type ChessState = GameSnapshot<ChessStatus>;
pub type CheckersState = GameSnapshot<CheckersStatus>;

/// The caller's move and the AI moves played in reply. Checkers replies can
/// hold several moves when the AI continues a jump chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome<S> {
    pub player: MoveOutcome<S>,
    pub replies: Vec<MoveOutcome<S>>,
}

impl<S> TurnOutcome<S> {
    /// State after the last move played.
    pub fn latest(&self) -> &GameSnapshot<S> {
        self.replies.last().map_or(&self.player.state, |reply| &reply.state)
    }
}

fn square(row: i32, col: i32) -> GameResult<Position> {
    Position::new(row, col).ok_or(GameError::OutOfBounds { row, col })
}

fn chess_game(state: &ChessState) -> GameResult<ChessGame> {
    ChessGame::from_snapshot(&state.board, state.current_player)
}

fn checkers_game(state: &CheckersState, rule: CaptureRule) -> GameResult<CheckersGame> {
    Ok(CheckersGame::from_snapshot(&state.board, state.current_player)?.with_capture_rule(rule))
}

pub fn new_chess_game() -> ChessState {
    GameSnapshot::from(&ChessGame::new())
}

pub fn new_checkers_game() -> CheckersState {
    GameSnapshot::from(&CheckersGame::new())
}

/// Legal destinations from `(row, col)`. Off-board squares have none.
pub fn chess_possible_moves(state: &ChessState, row: i32, col: i32) -> GameResult<Vec<Position>> {
    let game = chess_game(state)?;
    Ok(Position::new(row, col).map_or_else(Vec::new, |pos| game.possible_moves(pos)))
}

pub fn checkers_possible_moves(
    state: &CheckersState,
    rule: CaptureRule,
    row: i32,
    col: i32,
) -> GameResult<Vec<Position>> {
    let game = checkers_game(state, rule)?;
    Ok(Position::new(row, col).map_or_else(Vec::new, |pos| game.possible_moves(pos)))
}

pub fn apply_chess_move(state: &ChessState, from: (i32, i32), to: (i32, i32)) -> GameResult<MoveOutcome<ChessStatus>> {
    let mut game = chess_game(state)?;
    let record = play_chess(&mut game, from, to)?;
    Ok(MoveOutcome::new(GameSnapshot::from(&game), &record))
}

pub fn apply_checkers_move(
    state: &CheckersState,
    rule: CaptureRule,
    from: (i32, i32),
    to: (i32, i32),
) -> GameResult<MoveOutcome<CheckersStatus>> {
    let mut game = checkers_game(state, rule)?;
    let record = play_checkers(&mut game, from, to)?;
    Ok(MoveOutcome::new(GameSnapshot::from(&game), &record))
}

pub fn chess_best_move(state: &ChessState, config: AiConfig) -> GameResult<Option<Move>> {
    Ok(ChessAI::new(config).best_move(&chess_game(state)?))
}

pub fn checkers_best_move(state: &CheckersState, rule: CaptureRule, config: AiConfig) -> GameResult<Option<Move>> {
    Ok(CheckersAI::new(config).best_move(&checkers_game(state, rule)?))
}

/// Applies the caller's move and, when `ai` is given and its side is to move
/// in a game that is not over, the AI's reply.
pub fn play_chess_turn(
    state: &ChessState,
    from: (i32, i32),
    to: (i32, i32),
    ai: Option<AiConfig>,
) -> GameResult<TurnOutcome<ChessStatus>> {
    let mut game = chess_game(state)?;
    let record = play_chess(&mut game, from, to)?;
    let player = MoveOutcome::new(GameSnapshot::from(&game), &record);

    let mut replies = Vec::new();
    if let Some(config) = ai {
        if game.current_player() == config.side && !game.status().is_over() {
            if let Some(mv) = ChessAI::new(config).best_move(&game) {
                let record = game.try_apply_move(mv.from, mv.to)?;
                replies.push(MoveOutcome::new(GameSnapshot::from(&game), &record));
            }
        }
    }
    Ok(TurnOutcome { player, replies })
}

/// Like [`play_chess_turn`]. The AI keeps moving while a jump chain leaves it
/// to move.
pub fn play_checkers_turn(
    state: &CheckersState,
    rule: CaptureRule,
    from: (i32, i32),
    to: (i32, i32),
    ai: Option<AiConfig>,
) -> GameResult<TurnOutcome<CheckersStatus>> {
    let mut game = checkers_game(state, rule)?;
    let record = play_checkers(&mut game, from, to)?;
    let player = MoveOutcome::new(GameSnapshot::from(&game), &record);

    let mut replies = Vec::new();
    if let Some(config) = ai {
        let mut checkers_ai = CheckersAI::new(config);
        while game.current_player() == config.side && game.status() == CheckersStatus::Playing {
            let Some(mv) = checkers_ai.best_move(&game) else { break };
            let record = game.try_apply_move(mv.from, mv.to)?;
            replies.push(MoveOutcome::new(GameSnapshot::from(&game), &record));
        }
    }
    Ok(TurnOutcome { player, replies })
}

fn play_chess(game: &mut ChessGame, from: (i32, i32), to: (i32, i32)) -> GameResult<MoveRecord> {
    let (from, to) = (square(from.0, from.1)?, square(to.0, to.1)?);
    game.try_apply_move(from, to).map_err(|err| {
        warn!("rejected chess move: {}", err);
        err
    })
}

fn play_checkers(game: &mut CheckersGame, from: (i32, i32), to: (i32, i32)) -> GameResult<MoveRecord> {
    let (from, to) = (square(from.0, from.1)?, square(to.0, to.1)?);
    game.try_apply_move(from, to).map_err(|err| {
        warn!("rejected checkers move: {}", err);
        err
    })
}
