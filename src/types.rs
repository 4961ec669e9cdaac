// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

/// Number of ranks on the board. Row 0 is Black's back rank, row 9 is Red's.
pub const ROWS: usize = 10;

/// Number of files on the board.
pub const COLS: usize = 9;

/// Enums that index per-color and per-kind tables, such as the king cache and positional tables.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Returns whether or not the given coordinates lie on the board.
pub fn in_bounds(row: i32, col: i32) -> bool {
    row >= 0 && row < ROWS as i32 && col >= 0 && col < COLS as i32
}

/// Returns whether or not the given coordinates lie within the palace of the given color.
pub fn in_palace(row: i32, col: i32, color: Color) -> bool {
    if col < 3 || col > 5 {
        return false;
    }

    match color {
        Color::Black => row >= 0 && row <= 2,
        Color::Red => row >= 7 && row <= 9,
    }
}

/// A square on the board, addressed by row and column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Square {
        debug_assert!(row < ROWS && col < COLS, "square out of bounds");
        Square {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn try_new(row: i32, col: i32) -> Option<Square> {
        if in_bounds(row, col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index of this square, in `0..90`.
    pub fn as_index(self) -> usize {
        self.row() * COLS + self.col()
    }

    /// The square `(dr, dc)` away from this one, if it is on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        Square::try_new(self.row as i32 + dr, self.col as i32 + dc)
    }

    pub fn in_palace(self, color: Color) -> bool {
        in_palace(self.row as i32, self.col as i32, color)
    }

    /// Whether this square is on the given color's side of the river.
    pub fn on_home_side(self, color: Color) -> bool {
        match color {
            Color::Black => self.row <= 4,
            Color::Red => self.row >= 5,
        }
    }

    /// The square reflected across the river, used to read Red-oriented tables for Black.
    pub fn mirror(self) -> Square {
        Square::new(ROWS - 1 - self.row(), self.col())
    }
}

// Squares are printed in ICCS notation: files a through i from left to right, ranks 0 through 9
// counted from Red's back rank.
impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        write!(f, "{}{}", file, ROWS - 1 - self.row())
    }
}

/// Iterates all squares of the board in row-major order.
pub fn squares() -> impl Iterator<Item = Square> {
    (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Square::new(row, col)))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row delta of a forward step for this color's pawns.
    pub fn forward(self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::Red => 'r',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Color {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'r' | 'w' => Ok(Color::Red),
            'b' => Ok(Color::Black),
            _ => Err(()),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::Red, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Rook,
    Knight,
    Elephant,
    Advisor,
    King,
    Cannon,
    Pawn,
}

impl PieceKind {
    fn letter(self) -> char {
        match self {
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Elephant => 'E',
            PieceKind::Advisor => 'A',
            PieceKind::King => 'K',
            PieceKind::Cannon => 'C',
            PieceKind::Pawn => 'P',
        }
    }

    /// Most pieces of this kind a side starts the game with.
    pub fn starting_count(self) -> usize {
        match self {
            PieceKind::King => 1,
            PieceKind::Pawn => 5,
            _ => 2,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.letter())
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value.to_ascii_uppercase() {
            'R' => PieceKind::Rook,
            'N' | 'H' => PieceKind::Knight,
            'E' | 'B' => PieceKind::Elephant,
            'A' => PieceKind::Advisor,
            'K' => PieceKind::King,
            'C' => PieceKind::Cannon,
            'P' => PieceKind::Pawn,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::King,
    PieceKind::Cannon,
    PieceKind::Pawn,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// The two-symbol cell code of this piece, color first (e.g. `rC` for a red cannon).
    pub fn code(self) -> String {
        format!("{}{}", self.color, self.kind)
    }

    /// Parses a two-symbol cell code produced by `code`.
    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.chars();
        let color = match chars.next()? {
            'r' => Color::Red,
            'b' => Color::Black,
            _ => return None,
        };
        let kind_chr = chars.next()?;
        if chars.next().is_some() || !kind_chr.is_ascii_uppercase() {
            return None;
        }

        let kind = PieceKind::try_from(kind_chr).ok()?;
        if kind.letter() != kind_chr {
            return None;
        }

        Some(Piece::new(kind, color))
    }
}

// FEN letters: uppercase is Red, lowercase is Black.
impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.color {
            Color::Red => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        };
        f.write_char(chr)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::{in_palace, squares, Color, Piece, PieceKind, Square, TableIndex, PIECE_KINDS};

    #[test]
    fn palace_bounds() {
        assert!(in_palace(0, 3, Color::Black));
        assert!(in_palace(2, 5, Color::Black));
        assert!(!in_palace(3, 4, Color::Black));
        assert!(!in_palace(1, 6, Color::Black));
        assert!(in_palace(7, 4, Color::Red));
        assert!(!in_palace(6, 4, Color::Red));
        assert!(!in_palace(1, 4, Color::Red));
    }

    #[test]
    fn offset_off_board() {
        let sq = Square::new(0, 8);
        assert_eq!(None, sq.offset(-1, 0));
        assert_eq!(None, sq.offset(0, 1));
        assert_eq!(Some(Square::new(1, 7)), sq.offset(1, -1));
    }

    #[test]
    fn river_sides() {
        assert!(Square::new(4, 0).on_home_side(Color::Black));
        assert!(!Square::new(5, 0).on_home_side(Color::Black));
        assert!(Square::new(5, 0).on_home_side(Color::Red));
        assert!(!Square::new(4, 0).on_home_side(Color::Red));
    }

    #[test]
    fn iccs_display() {
        assert_eq!("a9", Square::new(0, 0).to_string());
        assert_eq!("e0", Square::new(9, 4).to_string());
        assert_eq!("b2", Square::new(7, 1).to_string());
    }

    #[test]
    fn squares_row_major() {
        let all: Vec<_> = squares().collect();
        assert_eq!(90, all.len());
        assert_eq!(Square::new(0, 0), all[0]);
        assert_eq!(Square::new(1, 0), all[9]);
        assert_eq!(Square::new(9, 8), all[89]);
    }

    #[test]
    fn piece_codes() {
        let piece = Piece::new(PieceKind::Cannon, Color::Red);
        assert_eq!("rC", piece.code());
        assert_eq!(Some(piece), Piece::from_code("rC"));
        assert_eq!(None, Piece::from_code("rc"));
        assert_eq!(None, Piece::from_code("rH"));
        assert_eq!(None, Piece::from_code("xK"));
        assert_eq!(None, Piece::from_code("bKK"));
    }

    #[test]
    fn fen_letters() {
        let knight = Piece::try_from('h').unwrap();
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black), knight);
        assert_eq!("n", knight.to_string());
        assert_eq!("E", Piece::try_from('B').unwrap().to_string());
        assert!(Piece::try_from('q').is_err());
    }

    #[test]
    fn kinds_index_tables_in_order() {
        for (i, &kind) in PIECE_KINDS.iter().enumerate() {
            assert_eq!(i, kind.as_index());
            assert_eq!(kind, PieceKind::from_index(i));
        }
        assert_eq!(Color::Black, Color::from_index(Color::Red.as_index() + 1));
    }
}
