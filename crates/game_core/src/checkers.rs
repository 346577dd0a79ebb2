//! Checkers rules on the dark squares of an 8x8 board.
//!
//! Black starts on rows 0-2 and moves down, white starts on rows 5-7 and
//! moves up. Any move whose landing square offers a capture keeps the same
//! side to move. Move choice stays per piece: a piece with a capture must
//! take it, other pieces may still step.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSnapshot};
use crate::error::{GameError, GameResult};
use crate::moves::{Move, MoveRecord};
use crate::piece::{Checker, CheckerKind, Color};
use crate::position::Position;

pub type CheckersBoard = Board<Checker>;

const MAX_PIECES_PER_SIDE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckersStatus {
    Playing,
    Win,
}

/// How captures constrain the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureRule {
    /// A piece that can capture must capture, but other pieces may still
    /// make simple moves.
    #[default]
    PerPiece,
    /// While any piece of the side to move can capture, only captures are
    /// allowed.
    Mandatory,
}

/// A capture available to a piece: where it lands and whom it removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub landing: Position,
    pub captured: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckersGame {
    board: CheckersBoard,
    current_player: Color,
    status: CheckersStatus,
    capture_rule: CaptureRule,
    must_capture: bool,
    pending_jump: Option<Position>,
    history: Vec<MoveRecord>,
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckersGame {
    pub fn new() -> Self {
        Self {
            board: Self::initial_board(),
            current_player: Color::White,
            status: CheckersStatus::Playing,
            capture_rule: CaptureRule::default(),
            must_capture: false,
            pending_jump: None,
            history: Vec::new(),
        }
    }

    pub fn initial_board() -> CheckersBoard {
        let mut board = CheckersBoard::empty();
        for pos in Position::all().filter(|pos| pos.is_dark()) {
            match pos.row {
                0..=2 => board.place(pos, Checker::man(Color::Black)),
                5..=7 => board.place(pos, Checker::man(Color::White)),
                _ => {}
            }
        }
        board
    }

    /// Builds a game over an arbitrary position. Pieces must stand on dark
    /// squares and neither side may have more than twelve.
    pub fn from_board(board: CheckersBoard, current_player: Color) -> GameResult<Self> {
        if let Some((pos, _)) = board.pieces().find(|(pos, _)| !pos.is_dark()) {
            return Err(GameError::MalformedBoard(format!(
                "piece on light square {}",
                pos
            )));
        }
        for color in [Color::White, Color::Black] {
            let count = board.count(color);
            if count > MAX_PIECES_PER_SIDE {
                return Err(GameError::MalformedBoard(format!(
                    "{} has {} pieces",
                    color.name(),
                    count
                )));
            }
        }

        let mut game = Self {
            board,
            current_player,
            status: CheckersStatus::Playing,
            capture_rule: CaptureRule::default(),
            must_capture: false,
            pending_jump: None,
            history: Vec::new(),
        };
        game.refresh();
        Ok(game)
    }

    pub fn from_snapshot(snapshot: &BoardSnapshot, current_player: Color) -> GameResult<Self> {
        Self::from_board(CheckersBoard::from_snapshot(snapshot)?, current_player)
    }

    pub fn with_capture_rule(mut self, rule: CaptureRule) -> Self {
        self.capture_rule = rule;
        self.refresh();
        self
    }

    pub fn board(&self) -> &CheckersBoard {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> CheckersStatus {
        self.status
    }

    pub fn capture_rule(&self) -> CaptureRule {
        self.capture_rule
    }

    /// Whether the side to move has a capture anywhere on the board.
    pub fn must_capture(&self) -> bool {
        self.must_capture
    }

    /// The square of the piece that just moved and can capture again, while
    /// the same side stays to move.
    pub fn pending_jump(&self) -> Option<Position> {
        self.pending_jump
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Destinations for the piece on `pos`: its captures when it has any,
    /// otherwise its simple diagonal steps.
    pub fn possible_moves(&self, pos: Position) -> Vec<Position> {
        if !self.board.is_color_at(pos, self.current_player) {
            return Vec::new();
        }

        let jumps = capture_jumps(&self.board, pos);
        if !jumps.is_empty() {
            return jumps.into_iter().map(|jump| jump.landing).collect();
        }
        if self.capture_rule == CaptureRule::Mandatory && self.must_capture {
            return Vec::new();
        }
        simple_steps(&self.board, pos)
    }

    /// Capture landings for whatever piece stands on `pos`.
    pub fn capture_moves(&self, pos: Position) -> Vec<Position> {
        capture_jumps(&self.board, pos)
            .into_iter()
            .map(|jump| jump.landing)
            .collect()
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        capture_jumps(&self.board, mv.from)
            .iter()
            .any(|jump| jump.landing == mv.to)
    }

    pub fn has_captures_available(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .any(|(pos, _)| !capture_jumps(&self.board, pos).is_empty())
    }

    pub fn is_valid_move(&self, from: Position, to: Position) -> bool {
        self.check_move(from, to).is_ok()
    }

    fn check_move(&self, from: Position, to: Position) -> GameResult<()> {
        let invalid = |reason| Err(GameError::InvalidMove { from, to, reason });

        if !to.is_dark() {
            return invalid("destination is a light square");
        }
        if !self.board.is_color_at(from, self.current_player) {
            return invalid("no piece of the side to move on the origin square");
        }
        if !self.board.is_empty_at(to) {
            return invalid("destination is occupied");
        }
        if !self.possible_moves(from).contains(&to) {
            return invalid("not a legal move for this piece");
        }
        Ok(())
    }

    /// Applies a move after validating it. On error nothing is changed.
    pub fn try_apply_move(&mut self, from: Position, to: Position) -> GameResult<MoveRecord> {
        self.check_move(from, to)?;

        let mv = Move::new(from, to);
        let record = MoveRecord {
            mv,
            notation: mv.to_string(),
            capture: self.is_capture(mv),
        };
        self.play(mv);
        self.history.push(record.clone());

        trace!(
            "checkers move {} -> {:?}, {} to move",
            record.notation,
            self.status,
            self.current_player.name()
        );
        Ok(record)
    }

    /// Applies a move; returns `false` without touching the game if it is not legal.
    pub fn apply_move(&mut self, from: Position, to: Position) -> bool {
        self.try_apply_move(from, to).is_ok()
    }

    /// Every legal move of the side to move, squares in row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces()
            .filter(|(_, p)| p.color == self.current_player)
            .flat_map(|(from, _)| {
                self.possible_moves(from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// Legal moves `color` would have if it were to move now.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        if color == self.current_player {
            return self.legal_moves();
        }
        let mut view = self.without_history();
        view.current_player = color;
        view.pending_jump = None;
        view.must_capture = view.has_captures_available(color);
        // Status is not needed for move generation.
        view.legal_moves()
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board
            .pieces()
            .filter(|(_, p)| p.color == self.current_player)
            .any(|(pos, _)| !self.possible_moves(pos).is_empty())
    }

    /// `Win` once a side has no pieces or the side to move cannot move.
    pub fn derive_status(&self) -> CheckersStatus {
        if self.board.count(Color::White) == 0
            || self.board.count(Color::Black) == 0
            || !self.has_legal_moves()
        {
            CheckersStatus::Win
        } else {
            CheckersStatus::Playing
        }
    }

    pub fn winner(&self) -> Option<Color> {
        if self.status != CheckersStatus::Win {
            return None;
        }
        if self.board.count(Color::White) == 0 {
            Some(Color::Black)
        } else if self.board.count(Color::Black) == 0 {
            Some(Color::White)
        } else {
            Some(self.current_player.opposite())
        }
    }

    /// The same position with `color` to move. Any jump chain in progress is
    /// dropped when the side changes.
    pub fn with_side_to_move(&self, color: Color) -> Self {
        let mut game = self.without_history();
        if color != self.current_player {
            game.current_player = color;
            game.pending_jump = None;
            game.refresh();
        }
        game
    }

    /// The game after `mv`, for search. The move is assumed legal and no
    /// history is kept.
    pub fn after(&self, mv: Move) -> Self {
        let mut next = self.without_history();
        next.play(mv);
        next
    }

    fn without_history(&self) -> Self {
        Self {
            board: self.board,
            current_player: self.current_player,
            status: self.status,
            capture_rule: self.capture_rule,
            must_capture: self.must_capture,
            pending_jump: self.pending_jump,
            history: Vec::new(),
        }
    }

    fn play(&mut self, mv: Move) {
        let jump = capture_jumps(&self.board, mv.from)
            .into_iter()
            .find(|jump| jump.landing == mv.to);

        let Some(mut piece) = self.board.take(mv.from) else { return };
        if let Some(jump) = jump {
            self.board.take(jump.captured);
        }
        if piece.kind == CheckerKind::Man && mv.to.row == piece.color.promotion_row() {
            piece.kind = CheckerKind::King;
        }
        self.board.place(mv.to, piece);

        if !capture_jumps(&self.board, mv.to).is_empty() {
            self.pending_jump = Some(mv.to);
        } else {
            self.pending_jump = None;
            self.current_player = self.current_player.opposite();
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.must_capture = self.has_captures_available(self.current_player);
        self.status = self.derive_status();
    }
}

/// Jumps over an adjacent enemy onto an empty dark square two steps away,
/// along the directions the piece may move in.
pub fn capture_jumps(board: &CheckersBoard, from: Position) -> Vec<Jump> {
    let Some(piece) = board.get(from) else { return Vec::new() };

    piece
        .directions()
        .iter()
        .filter_map(|&(dr, dc)| {
            let captured = from.offset(dr, dc)?;
            let landing = from.offset(2 * dr, 2 * dc)?;
            (landing.is_dark()
                && board.is_color_at(captured, piece.color.opposite())
                && board.is_empty_at(landing))
            .then_some(Jump { landing, captured })
        })
        .collect()
}

/// One-step diagonal moves onto empty dark squares.
pub fn simple_steps(board: &CheckersBoard, from: Position) -> Vec<Position> {
    let Some(piece) = board.get(from) else { return Vec::new() };

    piece
        .directions()
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| to.is_dark() && board.is_empty_at(to))
        .collect()
}
