pub mod ai;
pub mod evaluation;
pub mod search;
pub mod service;

pub use ai::{AiConfig, CheckersAI, ChessAI};
pub use evaluation::{evaluate_checkers, evaluate_chess, WIN_SCORE};
pub use search::{minimax, SearchState};
pub use service::{CheckersState, ChessState, TurnOutcome};
