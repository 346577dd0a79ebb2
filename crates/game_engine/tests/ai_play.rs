use game_core::{CheckersBoard, CheckersGame, ChessBoard, ChessGame, ChessStatus, Color, Move, Position};
use game_engine::{AiConfig, CheckersAI, ChessAI};

fn sq(name: &str) -> Position {
    Position::from_algebraic(name).unwrap()
}

fn at(row: i32, col: i32) -> Position {
    Position::new(row, col).unwrap()
}

#[test]
fn chess_ai_is_deterministic_with_search() {
    let mut game = ChessGame::new();
    assert!(game.apply_move(sq("e2"), sq("e4")));

    let ai = ChessAI::new(AiConfig::new(2, Color::Black));
    let first = ai.best_move(&game).unwrap();
    let second = ai.best_move(&game).unwrap();
    assert_eq!(first, second);
    assert!(game.is_valid_move(first.from, first.to));
}

#[test]
fn chess_ai_finds_mate_in_one() {
    let board: ChessBoard = "
        ........
        ........
        ........
        ........
        ........
        ......k.
        .....q..
        .......K
    "
    .parse()
    .unwrap();
    let mut game = ChessGame::from_board(board, Color::Black).unwrap();

    let mv = ChessAI::new(AiConfig::new(2, Color::Black)).best_move(&game).unwrap();
    assert!(game.apply_move(mv.from, mv.to));
    assert_eq!(game.status(), ChessStatus::Checkmate);
}

#[test]
fn shallow_chess_ai_prefers_mate_to_material() {
    let board: ChessBoard = "
        .k......
        r.......
        ......p.
        .......R
        ........
        ........
        ......PP
        .......K
    "
    .parse()
    .unwrap();
    let mut game = ChessGame::from_board(board, Color::Black).unwrap();

    // g6xh5 wins a rook, a7-a1 mates.
    let mv = ChessAI::new(AiConfig::new(1, Color::Black)).best_move(&game).unwrap();
    assert_eq!(mv, Move::new(sq("a7"), sq("a1")));
    assert!(game.apply_move(mv.from, mv.to));
    assert_eq!(game.status(), ChessStatus::Checkmate);
}

#[test]
fn shallow_chess_ai_avoids_stalemating_a_lost_opponent() {
    let board: ChessBoard = "
        k.......
        ..p.....
        .K......
        ........
        ........
        ........
        ..Q.....
        ........
    "
    .parse()
    .unwrap();
    let mut game = ChessGame::from_board(board, Color::White).unwrap();

    // Qxc7 wins a pawn but leaves black without a move.
    let mv = ChessAI::new(AiConfig::new(1, Color::White)).best_move(&game).unwrap();
    assert_ne!(mv, Move::new(sq("c2"), sq("c7")));
    assert!(game.apply_move(mv.from, mv.to));
    assert_ne!(game.status(), ChessStatus::Stalemate);
}

#[test]
fn chess_ai_takes_a_hanging_queen() {
    let board: ChessBoard = "
        ...r..k.
        ........
        ........
        ........
        ...Q....
        ........
        ........
        K.......
    "
    .parse()
    .unwrap();
    let game = ChessGame::from_board(board, Color::Black).unwrap();
    assert_eq!(game.status(), ChessStatus::Playing);

    let mv = ChessAI::new(AiConfig::new(1, Color::Black)).best_move(&game).unwrap();
    assert_eq!(mv, Move::new(sq("d8"), sq("d4")));
}

#[test]
fn chess_ai_can_play_white() {
    let game = ChessGame::new();
    let mv = ChessAI::new(AiConfig::new(1, Color::White)).best_move(&game).unwrap();
    assert_eq!(game.board().get(mv.from).map(|p| p.color), Some(Color::White));
    assert!(game.is_valid_move(mv.from, mv.to));
}

#[test]
fn chess_ai_has_no_move_when_mated() {
    let mut game = ChessGame::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert!(game.apply_move(sq(from), sq(to)));
    }
    assert_eq!(ChessAI::new(AiConfig::new(2, Color::White)).best_move(&game), None);
}

#[test]
fn checkers_ai_is_deterministic_with_search() {
    let game = CheckersGame::from_board(CheckersGame::initial_board(), Color::Black).unwrap();
    let config = AiConfig::new(2, Color::Black);
    let first = CheckersAI::new(config).best_move(&game).unwrap();
    let second = CheckersAI::new(config).best_move(&game).unwrap();
    assert_eq!(first, second);
    assert!(game.is_valid_move(first.from, first.to));
}

#[test]
fn checkers_ai_prefers_captures() {
    let board: CheckersBoard = "
        .b......
        ........
        ........
        ..b.....
        ...w....
        ........
        ........
        ......w.
    "
    .parse()
    .unwrap();
    let game = CheckersGame::from_board(board, Color::Black).unwrap();
    let capture = Move::new(at(3, 2), at(5, 4));

    for difficulty in [1, 2] {
        let mut ai = CheckersAI::with_seed(AiConfig::new(difficulty, Color::Black), 7);
        assert_eq!(ai.best_move(&game), Some(capture), "difficulty {difficulty}");
    }
}

#[test]
fn seeded_easy_ai_repeats_its_choices() {
    let config = AiConfig::new(1, Color::Black);
    let game = CheckersGame::from_board(CheckersGame::initial_board(), Color::Black).unwrap();

    let mut first = CheckersAI::with_seed(config, 42);
    let mut second = CheckersAI::with_seed(config, 42);
    for _ in 0..5 {
        let mv = first.best_move(&game).unwrap();
        assert_eq!(second.best_move(&game), Some(mv));
        assert!(game.is_valid_move(mv.from, mv.to));
    }
}

#[test]
fn checkers_ai_continues_a_jump_chain() {
    let board: CheckersBoard = "
        ........
        ..b.....
        ...w....
        ........
        .....w..
        ........
        ........
        ......w.
    "
    .parse()
    .unwrap();
    let mut game = CheckersGame::from_board(board, Color::Black).unwrap();
    let mut ai = CheckersAI::new(AiConfig::new(2, Color::Black));

    let first = ai.best_move(&game).unwrap();
    assert_eq!(first, Move::new(at(1, 2), at(3, 4)));
    assert!(game.apply_move(first.from, first.to));
    assert_eq!(game.current_player(), Color::Black);

    let second = ai.best_move(&game).unwrap();
    assert_eq!(second, Move::new(at(3, 4), at(5, 6)));
}
