use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction this side advances in. White starts at the bottom.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The far row for this side, where pawns promote and men are crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

/// Single-character codes used at the board snapshot boundary.
pub trait PieceCode: Copy + Sized {
    fn from_code(code: char) -> Option<Self>;
    fn code(self) -> char;
    fn color(self) -> Color;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }
}

/// A chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }
}

impl PieceCode for Piece {
    // Upper case is white, lower case is black.
    fn from_code(code: char) -> Option<Self> {
        let piece_type = match code.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if code.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self::new(piece_type, color))
    }

    fn code(self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }

    fn color(self) -> Color {
        self.color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    Man,
    King,
}

/// A checkers piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checker {
    pub kind: CheckerKind,
    pub color: Color,
}

impl Checker {
    pub fn man(color: Color) -> Self {
        Self { kind: CheckerKind::Man, color }
    }

    pub fn king(color: Color) -> Self {
        Self { kind: CheckerKind::King, color }
    }

    pub fn is_king(self) -> bool {
        self.kind == CheckerKind::King
    }

    /// Diagonal directions this piece may move and capture in.
    pub fn directions(self) -> &'static [(i32, i32)] {
        static ALL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
        match (self.kind, self.color) {
            (CheckerKind::King, _) => &ALL,
            (CheckerKind::Man, Color::White) => &ALL[..2],
            (CheckerKind::Man, Color::Black) => &ALL[2..],
        }
    }
}

impl PieceCode for Checker {
    // The letter names the color, upper case marks a king.
    fn from_code(code: char) -> Option<Self> {
        let color = match code.to_ascii_lowercase() {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        };
        let kind = if code.is_ascii_uppercase() { CheckerKind::King } else { CheckerKind::Man };
        Some(Self { kind, color })
    }

    fn code(self) -> char {
        let letter = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        match self.kind {
            CheckerKind::Man => letter,
            CheckerKind::King => letter.to_ascii_uppercase(),
        }
    }

    fn color(self) -> Color {
        self.color
    }
}
