//! Chess rules: move generation, legality, move application and status.
//!
//! Castling and en passant are not part of this rule set, and pawns always
//! promote to a queen.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSnapshot};
use crate::error::{GameError, GameResult};
use crate::moves::{Move, MoveRecord};
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

pub type ChessBoard = Board<Piece>;

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];
const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

const MAX_PIECES_PER_SIDE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChessStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
}

impl ChessStatus {
    pub fn is_over(self) -> bool {
        matches!(self, ChessStatus::Checkmate | ChessStatus::Stalemate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChessGame {
    board: ChessBoard,
    current_player: Color,
    status: ChessStatus,
    history: Vec<MoveRecord>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self {
            board: Self::initial_board(),
            current_player: Color::White,
            status: ChessStatus::Playing,
            history: Vec::new(),
        }
    }

    pub fn initial_board() -> ChessBoard {
        let mut board = ChessBoard::empty();
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &piece_type) in back_rank.iter().enumerate() {
            let col = col as u8;
            board.place(Position { row: 0, col }, Piece::new(piece_type, Color::Black));
            board.place(Position { row: 1, col }, Piece::new(PieceType::Pawn, Color::Black));
            board.place(Position { row: 6, col }, Piece::new(PieceType::Pawn, Color::White));
            board.place(Position { row: 7, col }, Piece::new(piece_type, Color::White));
        }
        board
    }

    /// Builds a game over an arbitrary position. Each side needs exactly one
    /// king; the status is derived from the position.
    pub fn from_board(board: ChessBoard, current_player: Color) -> GameResult<Self> {
        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|(_, p)| p.color == color && p.piece_type == PieceType::King)
                .count();
            if kings != 1 {
                return Err(GameError::MalformedBoard(format!(
                    "{} has {} kings, expected exactly one",
                    color.name(),
                    kings
                )));
            }
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
            status: ChessStatus::Playing,
            history: Vec::new(),
        };
        game.status = game.derive_status();
        Ok(game)
    }

    pub fn from_snapshot(snapshot: &BoardSnapshot, current_player: Color) -> GameResult<Self> {
        Self::from_board(ChessBoard::from_snapshot(snapshot)?, current_player)
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> ChessStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Legal destinations for the piece on `pos`, which must belong to the
    /// side to move.
    pub fn possible_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.get(pos) {
            Some(piece) if piece.color == self.current_player => legal_destinations(&self.board, pos),
            _ => Vec::new(),
        }
    }

    pub fn is_valid_move(&self, from: Position, to: Position) -> bool {
        self.check_move(from, to).is_ok()
    }

    fn check_move(&self, from: Position, to: Position) -> GameResult<()> {
        let invalid = |reason| Err(GameError::InvalidMove { from, to, reason });

        if !self.board.is_color_at(from, self.current_player) {
            return invalid("no piece of the side to move on the origin square");
        }
        if self.board.is_color_at(to, self.current_player) {
            return invalid("destination holds an own piece");
        }
        if !self.possible_moves(from).contains(&to) {
            return invalid("not a legal move for this piece");
        }
        Ok(())
    }

    /// Applies a move after validating it. On error nothing is changed.
    pub fn try_apply_move(&mut self, from: Position, to: Position) -> GameResult<MoveRecord> {
        self.check_move(from, to)?;

        let record = MoveRecord {
            mv: Move::new(from, to),
            notation: self.move_notation(from, to),
            capture: !self.board.is_empty_at(to),
        };

        relocate(&mut self.board, from, to);
        self.current_player = self.current_player.opposite();
        self.status = self.derive_status();
        self.history.push(record.clone());

        trace!("chess move {} -> status {:?}", record.notation, self.status);
        Ok(record)
    }

    /// Applies a move; returns `false` without touching the game if it is not legal.
    pub fn apply_move(&mut self, from: Position, to: Position) -> bool {
        self.try_apply_move(from, to).is_ok()
    }

    /// Short algebraic notation: piece letter (none for pawns), `x` when the
    /// destination is occupied, then the destination square.
    pub fn move_notation(&self, from: Position, to: Position) -> String {
        let mut notation = String::new();
        if let Some(piece) = self.board.get(from) {
            if piece.piece_type != PieceType::Pawn {
                notation.push(piece.piece_type.letter().to_ascii_uppercase());
            }
        }
        if !self.board.is_empty_at(to) {
            notation.push('x');
        }
        notation.push_str(&to.to_algebraic());
        notation
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        king_in_check(&self.board, color)
    }

    /// Every legal move of the side to move: squares in row-major order,
    /// destinations in generation order.
    pub fn legal_moves(&self) -> Vec<Move> {
        moves_for(&self.board, self.current_player)
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .any(|(pos, _)| !legal_destinations(&self.board, pos).is_empty())
    }

    /// Status of the position for the side to move. Pure function of the
    /// board and the side to move.
    pub fn derive_status(&self) -> ChessStatus {
        let in_check = self.is_in_check(self.current_player);
        let can_move = self.has_legal_moves(self.current_player);
        match (in_check, can_move) {
            (true, true) => ChessStatus::Check,
            (true, false) => ChessStatus::Checkmate,
            (false, false) => ChessStatus::Stalemate,
            (false, true) => ChessStatus::Playing,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        (self.status == ChessStatus::Checkmate).then(|| self.current_player.opposite())
    }

    /// The same position with `color` to move, status re-derived. History is
    /// not carried over.
    pub fn with_side_to_move(&self, color: Color) -> Self {
        let mut game = Self {
            board: self.board,
            current_player: color,
            status: self.status,
            history: Vec::new(),
        };
        game.status = game.derive_status();
        game
    }

    /// The position after `mv`, for search. The move is assumed legal and
    /// no history is kept; the status is derived for the new side to move.
    pub fn after(&self, mv: Move) -> Self {
        let mut board = self.board;
        relocate(&mut board, mv.from, mv.to);
        let mut next = Self {
            board,
            current_player: self.current_player.opposite(),
            status: ChessStatus::Playing,
            history: Vec::new(),
        };
        next.status = next.derive_status();
        next
    }
}

/// Moves the piece and promotes a pawn that reaches the far rank.
fn relocate(board: &mut ChessBoard, from: Position, to: Position) {
    let Some(mut piece) = board.take(from) else { return };
    if piece.piece_type == PieceType::Pawn && to.row == piece.color.promotion_row() {
        piece.piece_type = PieceType::Queen;
    }
    board.place(to, piece);
}

fn moves_for(board: &ChessBoard, color: Color) -> Vec<Move> {
    board
        .pieces()
        .filter(|(_, p)| p.color == color)
        .flat_map(|(from, _)| {
            legal_destinations(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Pseudo-legal destinations that do not leave the mover's king attacked.
fn legal_destinations(board: &ChessBoard, from: Position) -> Vec<Position> {
    let Some(piece) = board.get(from) else { return Vec::new() };
    pseudo_legal_moves(board, from)
        .into_iter()
        .filter(|&to| {
            let mut trial = *board;
            let moving = trial.take(from);
            trial.set(to, moving);
            !king_in_check(&trial, piece.color)
        })
        .collect()
}

/// Whether any enemy piece attacks the king of `color`. A side without a
/// king is never in check.
fn king_in_check(board: &ChessBoard, color: Color) -> bool {
    let Some(king_pos) = board
        .pieces()
        .find(|(_, p)| p.color == color && p.piece_type == PieceType::King)
        .map(|(pos, _)| pos)
    else {
        return false;
    };

    board
        .pieces()
        .filter(|(_, p)| p.color != color)
        .any(|(pos, _)| pseudo_legal_moves(board, pos).contains(&king_pos))
}

/// Destinations consistent with the piece's movement geometry, ignoring
/// king safety.
pub fn pseudo_legal_moves(board: &ChessBoard, from: Position) -> Vec<Position> {
    let Some(piece) = board.get(from) else { return Vec::new() };

    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, from, piece.color),
        PieceType::Knight => step_moves(board, from, piece.color, &KNIGHT_OFFSETS),
        PieceType::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS),
        PieceType::Rook => slide_moves(board, from, piece.color, &ROOK_DIRECTIONS),
        PieceType::Queen => {
            let mut moves = slide_moves(board, from, piece.color, &ROOK_DIRECTIONS);
            moves.extend(slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS));
            moves
        }
        PieceType::King => step_moves(board, from, piece.color, &KING_OFFSETS),
    }
}

fn pawn_moves(board: &ChessBoard, from: Position, color: Color) -> Vec<Position> {
    let mut moves = Vec::new();
    let forward = color.forward();
    let home_row = match color {
        Color::White => 6,
        Color::Black => 1,
    };

    if let Some(one) = from.offset(forward, 0).filter(|&sq| board.is_empty_at(sq)) {
        moves.push(one);
        if from.row == home_row {
            if let Some(two) = from.offset(2 * forward, 0).filter(|&sq| board.is_empty_at(sq)) {
                moves.push(two);
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(target) = from.offset(forward, dc) {
            if board.is_color_at(target, color.opposite()) {
                moves.push(target);
            }
        }
    }
    moves
}

fn step_moves(board: &ChessBoard, from: Position, color: Color, offsets: &[(i32, i32)]) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| !board.is_color_at(to, color))
        .collect()
}

fn slide_moves(board: &ChessBoard, from: Position, color: Color, directions: &[(i32, i32)]) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.get(next) {
                None => moves.push(next),
                Some(target) => {
                    if target.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    fn game(text: &str, to_move: Color) -> ChessGame {
        ChessGame::from_board(text.parse().unwrap(), to_move).unwrap()
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let game = ChessGame::new();
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.derive_status(), ChessStatus::Playing);
    }

    #[test]
    fn knight_moves_from_start() {
        let game = ChessGame::new();
        let mut moves = game.possible_moves(sq("g1"));
        moves.sort();
        let mut expected = vec![sq("f3"), sq("h3")];
        expected.sort();
        assert_eq!(moves, expected);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let game = game(
            "
            ....k...
            ........
            ........
            ........
            ........
            ...p....
            ........
            R..P...K
            ",
            Color::White,
        );
        // Rook on a1 runs up the a-file and along rank 1 until the own pawn on d1.
        let moves = game.possible_moves(sq("a1"));
        assert_eq!(moves.len(), 7 + 2);
        assert!(moves.contains(&sq("a8")));
        assert!(moves.contains(&sq("c1")));
        assert!(!moves.contains(&sq("d1")));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let game = game(
            "
            ....r..k
            ........
            ........
            ........
            ........
            ........
            ....B...
            ....K...
            ",
            Color::White,
        );
        assert!(game.possible_moves(sq("e2")).is_empty());
        assert!(!game.is_valid_move(sq("e2"), sq("d3")));
    }

    #[test]
    fn pawn_captures_only_diagonally() {
        let game = game(
            "
            ....k...
            ........
            ........
            ........
            ...pp...
            ....P...
            ........
            ....K...
            ",
            Color::White,
        );
        assert_eq!(game.possible_moves(sq("e3")), vec![sq("d4")]);
    }

    #[test]
    fn promotion_makes_a_queen() {
        let mut game = game(
            "
            .......k
            P.......
            ........
            ........
            ........
            ........
            ........
            ....K...
            ",
            Color::White,
        );
        assert!(game.apply_move(sq("a7"), sq("a8")));
        assert_eq!(
            game.board().get(sq("a8")),
            Some(Piece::new(PieceType::Queen, Color::White))
        );
        assert_eq!(game.history()[0].notation, "a8");
    }

    #[test]
    fn notation_marks_captures() {
        let game = game(
            "
            ....k...
            ........
            ........
            ...p....
            ........
            ........
            ........
            ...QK...
            ",
            Color::White,
        );
        assert_eq!(game.move_notation(sq("d1"), sq("d5")), "Qxd5");
        assert_eq!(game.move_notation(sq("d1"), sq("d4")), "Qd4");
        assert_eq!(game.move_notation(sq("e1"), sq("f1")), "Kf1");
    }

    #[test]
    fn rejects_wrong_king_counts() {
        let board: ChessBoard = "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ........
        "
        .parse()
        .unwrap();
        assert!(matches!(
            ChessGame::from_board(board, Color::White),
            Err(GameError::MalformedBoard(_))
        ));
    }

    #[test]
    fn rejected_move_leaves_game_untouched() {
        let mut game = ChessGame::new();
        let before = game.clone();
        let err = game.try_apply_move(sq("e2"), sq("e5")).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove { .. }));
        assert!(!game.apply_move(sq("e7"), sq("e5")));
        assert_eq!(game, before);
    }

    #[test]
    fn after_derives_the_status_of_the_child() {
        let mut game = ChessGame::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            assert!(game.apply_move(sq(from), sq(to)));
        }
        let quiet = game.after(Move::new(sq("b8"), sq("c6")));
        assert_eq!(quiet.status(), ChessStatus::Playing);

        let mated = game.after(Move::new(sq("d8"), sq("h4")));
        assert_eq!(mated.current_player(), Color::White);
        assert_eq!(mated.status(), ChessStatus::Checkmate);
        assert!(mated.history().is_empty());
    }
}
