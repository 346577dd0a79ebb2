// Terminal front end for both games
pub mod command;
pub mod render;
pub mod session;

pub use command::Command;
pub use render::render_board;
pub use session::{run, GameKind, SessionConfig, Table};
