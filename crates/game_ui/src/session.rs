use std::io::{self, BufRead, Write};

use game_core::{
    CaptureRule, CheckersGame, CheckersStatus, ChessGame, ChessStatus, Color, GameResult, Move,
    MoveRecord, Position,
};
use game_engine::{AiConfig, CheckersAI, ChessAI};
use log::{debug, info};

use crate::command::{Command, HELP};
use crate::render::{render_board, render_squares};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Chess,
    Checkers,
}

/// How a terminal session is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub game: GameKind,
    /// `None` for two human players.
    pub ai: Option<AiConfig>,
    pub capture_rule: CaptureRule,
    /// Seeds the random choices of the easiest checkers AI.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameKind::Chess,
            ai: Some(AiConfig::default()),
            capture_rule: CaptureRule::default(),
            seed: None,
        }
    }
}

/// A game in progress together with its optional AI opponent.
pub enum Table {
    Chess {
        game: ChessGame,
        ai: Option<ChessAI>,
    },
    Checkers {
        game: CheckersGame,
        ai: Option<CheckersAI>,
    },
}

impl Table {
    pub fn new(config: &SessionConfig) -> Self {
        match config.game {
            GameKind::Chess => Table::Chess {
                game: ChessGame::new(),
                ai: config.ai.map(ChessAI::new),
            },
            GameKind::Checkers => Table::Checkers {
                game: CheckersGame::new().with_capture_rule(config.capture_rule),
                ai: config.ai.map(|ai| match config.seed {
                    Some(seed) => CheckersAI::with_seed(ai, seed),
                    None => CheckersAI::new(ai),
                }),
            },
        }
    }

    pub fn board_text(&self) -> String {
        match self {
            Table::Chess { game, .. } => render_board(game.board()),
            Table::Checkers { game, .. } => render_board(game.board()),
        }
    }

    pub fn current_player(&self) -> Color {
        match self {
            Table::Chess { game, .. } => game.current_player(),
            Table::Checkers { game, .. } => game.current_player(),
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            Table::Chess { game, .. } => game.status().is_over(),
            Table::Checkers { game, .. } => game.status() == CheckersStatus::Win,
        }
    }

    /// A line describing check or the result, if there is one to report.
    pub fn status_line(&self) -> Option<String> {
        match self {
            Table::Chess { game, .. } => match game.status() {
                ChessStatus::Playing => None,
                ChessStatus::Check => Some(format!("{} is in check", game.current_player().name())),
                ChessStatus::Checkmate => Some(format!(
                    "checkmate, {} wins",
                    game.current_player().opposite().name()
                )),
                ChessStatus::Stalemate => Some("stalemate, the game is drawn".to_string()),
            },
            Table::Checkers { game, .. } => match (game.winner(), game.pending_jump()) {
                (Some(winner), _) => Some(format!("{} wins", winner.name())),
                (None, Some(pos)) => Some(format!(
                    "{} moves again, {} can capture",
                    game.current_player().name(),
                    pos
                )),
                (None, None) => None,
            },
        }
    }

    pub fn possible_moves(&self, pos: Position) -> Vec<Position> {
        match self {
            Table::Chess { game, .. } => game.possible_moves(pos),
            Table::Checkers { game, .. } => game.possible_moves(pos),
        }
    }

    pub fn play(&mut self, mv: Move) -> GameResult<MoveRecord> {
        match self {
            Table::Chess { game, .. } => game.try_apply_move(mv.from, mv.to),
            Table::Checkers { game, .. } => game.try_apply_move(mv.from, mv.to),
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        match self {
            Table::Chess { game, .. } => game.history(),
            Table::Checkers { game, .. } => game.history(),
        }
    }

    fn ai_side(&self) -> Option<Color> {
        match self {
            Table::Chess { ai, .. } => ai.as_ref().map(|ai| ai.config().side),
            Table::Checkers { ai, .. } => ai.as_ref().map(|ai| ai.config().side),
        }
    }

    /// Whether the AI should move now.
    pub fn ai_to_move(&self) -> bool {
        !self.is_over() && self.ai_side() == Some(self.current_player())
    }

    /// Plays the AI's move. `Ok(None)` when there is no AI or it has no move.
    pub fn play_ai(&mut self) -> GameResult<Option<MoveRecord>> {
        let mv = match self {
            Table::Chess { game, ai: Some(ai) } => ai.best_move(game),
            Table::Checkers { game, ai: Some(ai) } => ai.best_move(game),
            _ => None,
        };
        mv.map(|mv| self.play(mv)).transpose()
    }
}

/// Runs a session reading commands from `input` until the game ends, the
/// player quits or input runs out.
pub fn run<R: BufRead, W: Write>(config: &SessionConfig, input: R, mut output: W) -> io::Result<()> {
    let mut table = Table::new(config);
    let mut lines = input.lines();
    info!("starting {:?} session", config.game);

    loop {
        while table.ai_to_move() {
            let side = table.current_player();
            match table.play_ai() {
                Ok(Some(record)) => writeln!(output, "{} plays {}", side.name(), record.notation)?,
                Ok(None) => break,
                Err(err) => {
                    writeln!(output, "AI move failed: {}", err)?;
                    break;
                }
            }
        }

        write!(output, "\n{}", table.board_text())?;
        if let Some(line) = table.status_line() {
            writeln!(output, "{}", line)?;
        }
        if table.is_over() {
            break;
        }

        write!(output, "{} to move> ", table.current_player().name())?;
        output.flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        debug!("input: {:?}", line);

        match Command::parse(&line) {
            Ok(Command::Play(mv)) => match table.play(mv) {
                Ok(record) => writeln!(output, "played {}", record.notation)?,
                Err(err) => writeln!(output, "{}", err)?,
            },
            Ok(Command::Moves(pos)) => {
                let moves = table.possible_moves(pos);
                if moves.is_empty() {
                    writeln!(output, "no moves from {}", pos)?;
                } else {
                    writeln!(output, "{}: {}", pos, render_squares(&moves))?;
                }
            }
            Ok(Command::History) => {
                for (i, record) in table.history().iter().enumerate() {
                    writeln!(output, "{:>3}. {}", i + 1, record.notation)?;
                }
            }
            Ok(Command::Help) => writeln!(output, "{}", HELP)?,
            Ok(Command::Quit) => break,
            Err(message) => writeln!(output, "{} (type 'help')", message)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(config: &SessionConfig, input: &str) -> String {
        let mut out = Vec::new();
        run(config, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn two_players(game: GameKind) -> SessionConfig {
        SessionConfig {
            game,
            ai: None,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn plays_fools_mate_between_two_players() {
        let out = transcript(&two_players(GameKind::Chess), "f2 f3\ne7e5\ng2 g4\nd8 h4\n");
        assert!(out.contains("played Qh4"));
        assert!(out.trim_end().ends_with("checkmate, black wins"));
    }

    #[test]
    fn lists_moves_and_history() {
        let out = transcript(&two_players(GameKind::Chess), "moves e2\ne2 e4\nhistory\nquit\n");
        assert!(out.contains("e2: e3 e4"));
        assert!(out.contains("  1. e4"));
    }

    #[test]
    fn rejects_illegal_input_without_moving() {
        let out = transcript(&two_players(GameKind::Checkers), "a3 a4\nnonsense\nquit\n");
        assert!(out.contains("invalid move a3 -> a4"));
        assert!(out.contains("(type 'help')"));
        assert!(!out.contains("played"));
    }

    #[test]
    fn ai_answers_the_player() {
        let config = SessionConfig {
            game: GameKind::Checkers,
            ai: Some(AiConfig::new(1, Color::Black)),
            seed: Some(3),
            ..SessionConfig::default()
        };
        let out = transcript(&config, "a3 b4\nquit\n");
        assert!(out.contains("played a3-b4"));
        assert!(out.contains("black plays "));
    }

    #[test]
    fn ai_opens_when_it_plays_white() {
        let config = SessionConfig {
            ai: Some(AiConfig::new(1, Color::White)),
            ..SessionConfig::default()
        };
        let out = transcript(&config, "");
        assert!(out.starts_with("white plays "));
    }

    #[test]
    fn announces_a_second_move_after_landing_next_to_an_enemy() {
        let config = two_players(GameKind::Checkers);
        let mut table = Table::new(&config);
        for (from, to) in [("c3", "d4"), ("f6", "e5")] {
            let mv = Move::from_algebraic(&format!("{from}{to}")).unwrap();
            table.play(mv).unwrap();
        }
        // e5 lands next to d4 with c3 empty behind it.
        assert_eq!(table.current_player(), Color::Black);
        assert_eq!(
            table.status_line().as_deref(),
            Some("black moves again, e5 can capture")
        );
    }
}
