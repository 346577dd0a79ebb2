use game_core::{Move, Position};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Moves(Position),
    History,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            None => Err("empty input".to_string()),
            Some("quit" | "exit" | "q") => Ok(Command::Quit),
            Some("history") => Ok(Command::History),
            Some("help" | "?") => Ok(Command::Help),
            Some("moves") => {
                let square = words.next().ok_or("usage: moves <square>")?;
                Position::from_algebraic(square)
                    .map(Command::Moves)
                    .ok_or_else(|| format!("unknown square '{}'", square))
            }
            Some(_) => Move::from_algebraic(line)
                .map(Command::Play)
                .ok_or_else(|| format!("cannot read '{}' as a move", line)),
        }
    }
}

pub const HELP: &str = "\
commands:
  e2 e4 | e2e4    play a move
  moves <square>  list destinations for the piece on a square
  history         show the moves played so far
  help            show this text
  quit            leave the game";
