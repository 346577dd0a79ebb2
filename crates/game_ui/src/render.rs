use game_core::{Board, PieceCode, Position, BOARD_SIZE};

const FILES: &str = "  a b c d e f g h";

/// Draws a board with rank numbers on both sides and file letters above and
/// below. Empty dark squares are drawn as `:` so checkers boards read easily.
pub fn render_board<P: PieceCode>(board: &Board<P>) -> String {
    let mut out = String::new();
    out.push_str(FILES);
    out.push('\n');
    for row in 0..BOARD_SIZE {
        let rank = BOARD_SIZE - row;
        out.push_str(&format!("{} ", rank));
        for col in 0..BOARD_SIZE {
            let pos = Position { row, col };
            let cell = match board.get(pos) {
                Some(piece) => piece.code(),
                None if pos.is_dark() => ':',
                None => '.',
            };
            out.push(cell);
            out.push(' ');
        }
        out.push_str(&format!("{}\n", rank));
    }
    out.push_str(FILES);
    out.push('\n');
    out
}

/// Square names joined with spaces, e.g. `e3 e4`.
pub fn render_squares(squares: &[Position]) -> String {
    squares
        .iter()
        .map(|p| p.to_algebraic())
        .collect::<Vec<_>>()
        .join(" ")
}
