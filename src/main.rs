use std::io;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use game_core::{CaptureRule, Color};
use game_engine::AiConfig;
use game_ui::{GameKind, SessionConfig};
use log::error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    Chess,
    Checkers,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Play against the computer
    Ai,
    /// Two players at one terminal
    Pvp,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CaptureRuleArg {
    PerPiece,
    Mandatory,
}

/// Chess and checkers in the terminal, against a friend or a minimax AI.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value = "chess")]
    game: GameArg,

    #[arg(long, value_enum, default_value = "ai")]
    mode: ModeArg,

    /// Search depth of the AI
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    difficulty: u32,

    /// Side the AI plays
    #[arg(long, value_enum, default_value = "black")]
    ai_side: SideArg,

    /// Checkers only: whether any capture on the board forces a capture
    #[arg(long, value_enum, default_value = "per-piece")]
    capture_rule: CaptureRuleArg,

    /// Seed for the random choices of the easiest checkers AI
    #[arg(long)]
    seed: Option<u64>,

    /// Log AI decisions
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let side = match self.ai_side {
            SideArg::White => Color::White,
            SideArg::Black => Color::Black,
        };
        SessionConfig {
            game: match self.game {
                GameArg::Chess => GameKind::Chess,
                GameArg::Checkers => GameKind::Checkers,
            },
            ai: match self.mode {
                ModeArg::Ai => Some(AiConfig::new(self.difficulty, side)),
                ModeArg::Pvp => None,
            },
            capture_rule: match self.capture_rule {
                CaptureRuleArg::PerPiece => CaptureRule::PerPiece,
                CaptureRuleArg::Mandatory => CaptureRule::Mandatory,
            },
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let stdin = io::stdin();
    match game_ui::run(&args.session_config(), stdin.lock(), io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("terminal session failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
