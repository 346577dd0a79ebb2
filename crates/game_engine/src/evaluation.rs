use game_core::{Checker, CheckerKind, CheckersGame, CheckersStatus, ChessGame, ChessStatus, Color, Piece, PieceType, Position};

/// Score of a finished game. Large enough to dominate any material count.
pub const WIN_SCORE: f64 = 10_000.0;

// Material values in pawns. The king is given a finite weight so that
// positions with a missing king still order sensibly.
const PAWN_VALUE: f64 = 1.0;
const KNIGHT_VALUE: f64 = 3.0;
const BISHOP_VALUE: f64 = 3.0;
const ROOK_VALUE: f64 = 5.0;
const QUEEN_VALUE: f64 = 9.0;
const KING_VALUE: f64 = 100.0;

// Piece-square tables in centipawns. Black pieces index them by board row
// directly, white pieces by the mirrored row.

// Pawn position table:
// - Rewards central pawns
// - Penalizes the d and e pawns standing still
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0,  0,  0,  0,  0,  0,  0,  0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5,  5, 10, 25, 25, 10,  5,  5],
    [0,  0,  0, 20, 20,  0,  0,  0],
    [5, -5,-10,  0,  0,-10, -5,  5],
    [5, 10, 10,-20,-20, 10, 10,  5],
    [0,  0,  0,  0,  0,  0,  0,  0]
];

// Knight position table:
// - Encourages knights to control center
// - Penalizes edge positions (knights are less effective there)
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50]
];

// Checkers position values: favor the center and advanced squares.
const CHECKERS_POSITION_TABLE: [[i32; 8]; 8] = [
    [0, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 2, 0, 2, 0, 2, 0],
    [0, 2, 0, 3, 0, 3, 0, 2],
    [2, 0, 3, 0, 4, 0, 3, 0],
    [0, 3, 0, 4, 0, 3, 0, 2],
    [2, 0, 3, 0, 3, 0, 2, 0],
    [0, 2, 0, 2, 0, 2, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 0]
];
const CHECKERS_POSITION_SCALE: f64 = 0.1;
const MAN_VALUE: f64 = 1.0;
const CHECKERS_KING_VALUE: f64 = 3.0;
const ADVANCED_BONUS: f64 = 0.5;
const PIECE_COUNT_WEIGHT: f64 = 2.0;
const MOBILITY_WEIGHT: f64 = 0.1;

fn side_sign(color: Color, ai_side: Color) -> f64 {
    if color == ai_side { 1.0 } else { -1.0 }
}

/// Evaluates a chess position from `ai_side`'s point of view: material plus
/// pawn and knight placement, or the result if the game is over.
pub fn evaluate_chess(game: &ChessGame, ai_side: Color) -> f64 {
    match game.status() {
        ChessStatus::Checkmate => {
            // The side to move has been mated.
            return -side_sign(game.current_player(), ai_side) * WIN_SCORE;
        }
        ChessStatus::Stalemate => return 0.0,
        ChessStatus::Playing | ChessStatus::Check => {}
    }

    game.board()
        .pieces()
        .map(|(pos, piece)| side_sign(piece.color, ai_side) * (piece_value(piece.piece_type) + position_bonus(piece, pos)))
        .sum()
}

/// Returns the base material value of a piece
fn piece_value(piece_type: PieceType) -> f64 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

/// Placement bonus in pawns. Only pawns and knights have tables.
fn position_bonus(piece: Piece, pos: Position) -> f64 {
    let table = match piece.piece_type {
        PieceType::Pawn => &PAWN_TABLE,
        PieceType::Knight => &KNIGHT_TABLE,
        _ => return 0.0,
    };
    let row = match piece.color {
        Color::Black => pos.row as usize,
        Color::White => 7 - pos.row as usize,
    };
    table[row][pos.col as usize] as f64 / 100.0
}

/// Evaluates a checkers position from `ai_side`'s point of view.
///
/// Finished games score `WIN_SCORE` for the winner. Otherwise the score sums
/// material, square bonuses, an advancement bonus, the piece count
/// difference and the difference in available moves.
pub fn evaluate_checkers(game: &CheckersGame, ai_side: Color) -> f64 {
    let board = game.board();
    let own = board.count(ai_side);
    let other = board.count(ai_side.opposite());

    if game.status() == CheckersStatus::Win {
        return if own == 0 {
            -WIN_SCORE
        } else if other == 0 {
            WIN_SCORE
        } else if game.legal_moves_for(ai_side).is_empty() {
            -WIN_SCORE
        } else {
            WIN_SCORE
        };
    }

    let placement: f64 = board
        .pieces()
        .map(|(pos, piece)| side_sign(piece.color, ai_side) * checker_value(piece, pos))
        .sum();

    let count_term = (own as f64 - other as f64) * PIECE_COUNT_WEIGHT;

    let own_moves = game.legal_moves_for(ai_side).len() as f64;
    let other_moves = game.legal_moves_for(ai_side.opposite()).len() as f64;
    let mobility_term = (own_moves - other_moves) * MOBILITY_WEIGHT;

    placement + count_term + mobility_term
}

fn checker_value(piece: Checker, pos: Position) -> f64 {
    let material = match piece.kind {
        CheckerKind::Man => MAN_VALUE,
        CheckerKind::King => CHECKERS_KING_VALUE,
    };
    let square = CHECKERS_POSITION_TABLE[pos.row as usize][pos.col as usize] as f64 * CHECKERS_POSITION_SCALE;
    let advanced = match piece.color {
        Color::Black => pos.row > 4,
        Color::White => pos.row < 3,
    };
    material + square + if advanced { ADVANCED_BONUS } else { 0.0 }
}
