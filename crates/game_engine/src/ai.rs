use game_core::{CheckersGame, CheckersStatus, ChessGame, Color, Move};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::evaluation::{evaluate_checkers, evaluate_chess, WIN_SCORE};
use crate::search::{pick_best, score_root_moves, SearchState};

const MIN_DIFFICULTY: u32 = 1;
const DEFAULT_DIFFICULTY: u32 = 2;
const EASY_CAPTURE_BONUS: f64 = 0.5;

/// Which side the AI plays and how deep it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiConfig {
    /// Chess searches this many plies. Checkers searches twice as many, and
    /// difficulty 1 in checkers picks among candidates at random.
    pub difficulty: u32,
    pub side: Color,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            side: Color::Black,
        }
    }
}

impl AiConfig {
    pub fn new(difficulty: u32, side: Color) -> Self {
        Self {
            difficulty: difficulty.max(MIN_DIFFICULTY),
            side,
        }
    }
}

impl SearchState for ChessGame {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.current_player()
    }

    fn legal_moves(&self) -> Vec<Move> {
        ChessGame::legal_moves(self)
    }

    fn child(&self, mv: Move) -> Self {
        self.after(mv)
    }

    fn is_over(&self) -> bool {
        self.status().is_over()
    }

    fn evaluate(&self, ai_side: Color) -> f64 {
        evaluate_chess(self, ai_side)
    }

    fn dead_end(&self, ai_side: Color) -> f64 {
        let mover = self.current_player();
        if !self.is_in_check(mover) {
            0.0
        } else if mover == ai_side {
            -WIN_SCORE
        } else {
            WIN_SCORE
        }
    }
}

impl SearchState for CheckersGame {
    type Move = Move;

    fn side_to_move(&self) -> Color {
        self.current_player()
    }

    fn legal_moves(&self) -> Vec<Move> {
        CheckersGame::legal_moves(self)
    }

    fn child(&self, mv: Move) -> Self {
        self.after(mv)
    }

    fn is_over(&self) -> bool {
        self.status() == CheckersStatus::Win
    }

    fn evaluate(&self, ai_side: Color) -> f64 {
        evaluate_checkers(self, ai_side)
    }

    // A side that cannot move has lost.
    fn dead_end(&self, ai_side: Color) -> f64 {
        if self.current_player() == ai_side {
            -WIN_SCORE
        } else {
            WIN_SCORE
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChessAI {
    config: AiConfig,
}

impl ChessAI {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> AiConfig {
        self.config
    }

    /// Best move for the configured side, whichever side is to move in `game`.
    /// Returns `None` when that side has no legal move.
    pub fn best_move(&self, game: &ChessGame) -> Option<Move> {
        let side = self.config.side;
        let root = if game.current_player() == side {
            game.clone()
        } else {
            game.with_side_to_move(side)
        };

        let moves = root.legal_moves();
        let depth = self.config.difficulty.max(MIN_DIFFICULTY) - 1;
        let scores = score_root_moves(&root, &moves, depth, side);
        let (mv, score) = pick_best(&moves, &scores)?;

        info!(
            "chess AI ({}) plays {} scoring {:.2} of {} candidates",
            side.name(),
            root.move_notation(mv.from, mv.to),
            score,
            moves.len()
        );
        Some(mv)
    }
}

/// Checkers AI. Captures are always preferred when the side has any.
#[derive(Debug, Clone)]
pub struct CheckersAI {
    config: AiConfig,
    rng: StdRng,
}

impl Default for CheckersAI {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

impl CheckersAI {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible random choices at difficulty 1.
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> AiConfig {
        self.config
    }

    pub fn best_move(&mut self, game: &CheckersGame) -> Option<Move> {
        let side = self.config.side;
        let root = if game.current_player() == side {
            game.clone()
        } else {
            game.with_side_to_move(side)
        };

        let (captures, quiet): (Vec<Move>, Vec<Move>) =
            root.legal_moves().into_iter().partition(|&mv| root.is_capture(mv));
        let is_capture = !captures.is_empty();
        let candidates = if is_capture { captures } else { quiet };

        let difficulty = self.config.difficulty.max(MIN_DIFFICULTY);
        let scores: Vec<f64> = if difficulty == 1 {
            let bonus = if is_capture { EASY_CAPTURE_BONUS } else { 0.0 };
            candidates
                .iter()
                .map(|_| self.rng.gen::<f64>() + bonus)
                .collect()
        } else {
            score_root_moves(&root, &candidates, difficulty * 2 - 1, side)
        };

        let (mv, score) = pick_best(&candidates, &scores)?;
        info!(
            "checkers AI ({}) plays {} scoring {:.2} of {} candidates",
            side.name(),
            mv,
            score,
            candidates.len()
        );
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CheckersBoard, ChessBoard, Position};

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn config_clamps_difficulty() {
        assert_eq!(AiConfig::new(0, Color::White).difficulty, 1);
        assert_eq!(AiConfig::default(), AiConfig::new(2, Color::Black));
    }

    #[test]
    fn chess_dead_end_depends_on_check() {
        let board: ChessBoard = "
            k.......
            ........
            .K......
            ........
            ........
            ........
            ..Q.....
            ........
        "
        .parse()
        .unwrap();
        let game = ChessGame::from_board(board, Color::White).unwrap();
        // c2-c7 stalemates black.
        let after = game.after(Move::new(sq("c2"), sq("c7")));
        assert!(SearchState::legal_moves(&after).is_empty());
        assert_eq!(after.dead_end(Color::Black), 0.0);
        // Leaves see the finished game too.
        assert!(after.is_over());
        assert_eq!(after.evaluate(Color::White), 0.0);

        let mated = game.after(Move::new(sq("c2"), sq("c8")));
        assert!(SearchState::legal_moves(&mated).is_empty());
        assert_eq!(mated.dead_end(Color::Black), -WIN_SCORE);
        assert_eq!(mated.dead_end(Color::White), WIN_SCORE);
    }

    #[test]
    fn blocked_checkers_side_is_lost_in_search() {
        let board: CheckersBoard = "
            ........
            ........
            ........
            ........
            ........
            ........
            .b......
            w.w.....
        "
        .parse()
        .unwrap();
        let game = CheckersGame::from_board(board, Color::Black).unwrap();
        assert_eq!(game.dead_end(Color::Black), -WIN_SCORE);
        assert_eq!(game.dead_end(Color::White), WIN_SCORE);
    }

    #[test]
    fn ai_plays_its_own_side_when_not_to_move() {
        let game = ChessGame::new();
        let mv = ChessAI::new(AiConfig::new(1, Color::Black))
            .best_move(&game)
            .unwrap();
        assert_eq!(game.board().get(mv.from).map(|p| p.color), Some(Color::Black));
    }
}
