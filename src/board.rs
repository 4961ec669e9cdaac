// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};
use std::ops::{Deref, DerefMut};

use crate::moves::{Move, MoveRecord};
use crate::types::TableIndex;
use crate::types::{squares, Color, Piece, PieceKind, Square, COLS, ROWS};

/// FEN of the standard starting position, Red to move.
pub const START_FEN: &str = "rneakaenr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNEAKAENR r";

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    Empty,
    WrongRankCount(usize),
    RankTooShort(usize),
    RankTooLong(usize),
    InvalidDigit,
    UnknownPiece(char),
    TooManyPieces(Piece),
    InvalidSideToMove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::Empty => write!(f, "empty FEN"),
            FenParseError::WrongRankCount(n) => write!(f, "expected {} ranks, got {}", ROWS, n),
            FenParseError::RankTooShort(row) => write!(f, "row {} has fewer than {} files", row, COLS),
            FenParseError::RankTooLong(row) => write!(f, "row {} has more than {} files", row, COLS),
            FenParseError::InvalidDigit => write!(f, "empty-square runs must be 1 through 9"),
            FenParseError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            FenParseError::TooManyPieces(piece) => write!(f, "too many pieces of kind '{}'", piece),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'r', 'w' or 'b'"),
        }
    }
}

impl Error for FenParseError {}

/// A 10x9 Xiangqi board.
///
/// Alongside the grid, the board caches the square of each side's king. The cache is maintained
/// by every mutating method, so check detection never has to scan for kings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; COLS]; ROWS],
    kings: [Option<Square>; 2],
}

//
// Board state getters
//

impl Board {
    pub const fn new() -> Board {
        Board {
            cells: [[None; COLS]; ROWS],
            kings: [None; 2],
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// The cached square of the given color's king, if it is on the board.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.kings[color.as_index()]
    }

    /// Iterates the pieces of the given color, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Iterates all occupied squares, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.occupied().count()
    }
}

//
// Move application and board manipulation
//

impl Board {
    /// Writes a cell directly, keeping the king cache in sync with the new content.
    pub fn set(&mut self, square: Square, cell: Option<Piece>) {
        if let Some(existing) = self.get(square) {
            if existing.kind == PieceKind::King && self.king(existing.color) == Some(square) {
                self.kings[existing.color.as_index()] = None;
            }
        }

        self.cells[square.row()][square.col()] = cell;
        if let Some(piece) = cell {
            if piece.kind == PieceKind::King {
                self.kings[piece.color.as_index()] = Some(square);
            }
        }
    }

    /// Moves whatever is on the source square to the destination square, returning the record
    /// needed to undo it. No legality checking is done here; that is the move generator's job.
    pub fn apply_move(&mut self, mov: Move) -> MoveRecord {
        let (src, dst) = (mov.source(), mov.destination());
        let moved = self.get(src);
        let captured = self.get(dst);

        self.cells[src.row()][src.col()] = None;
        self.cells[dst.row()][dst.col()] = moved;

        // Captured king first, so that a null move of a king (src == dst) leaves it cached.
        if let Some(piece) = captured {
            if piece.kind == PieceKind::King && self.king(piece.color) == Some(dst) {
                self.kings[piece.color.as_index()] = None;
            }
        }

        if let Some(piece) = moved {
            if piece.kind == PieceKind::King {
                self.kings[piece.color.as_index()] = Some(dst);
            }
        }

        MoveRecord {
            mov,
            moved,
            captured,
        }
    }

    /// Reverses a move previously applied with `apply_move`.
    pub fn undo_move(&mut self, record: MoveRecord) {
        let (src, dst) = (record.source(), record.destination());
        self.cells[src.row()][src.col()] = record.moved;
        self.cells[dst.row()][dst.col()] = record.captured;

        if let Some(piece) = record.moved {
            if piece.kind == PieceKind::King {
                self.kings[piece.color.as_index()] = Some(src);
            }
        }

        if let Some(piece) = record.captured {
            if piece.kind == PieceKind::King {
                self.kings[piece.color.as_index()] = Some(dst);
            }
        }
    }

    /// Applies a move for the lifetime of the returned guard. The guard dereferences to this
    /// board and undoes the move when dropped, on every exit path.
    pub fn scoped_move(&mut self, mov: Move) -> ScopedMove<'_> {
        let record = self.apply_move(mov);
        ScopedMove {
            board: self,
            record,
        }
    }
}

/// A move applied to a borrowed board, undone on drop. See `Board::scoped_move`.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    record: MoveRecord,
}

impl<'a> Deref for ScopedMove<'a> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl<'a> DerefMut for ScopedMove<'a> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl<'a> Drop for ScopedMove<'a> {
    fn drop(&mut self) {
        self.board.undo_move(self.record);
    }
}

//
// FEN parsing and generation.
//
// Ranks are written from row 0 (Black's back rank) down to row 9, separated by '/'. Digits are
// runs of empty squares and letters are pieces, uppercase for Red. An optional side to move
// follows the placement; anything after that is ignored.
//

impl Board {
    pub fn from_start_position() -> Board {
        Board::from_fen(START_FEN).unwrap()
    }

    /// Constructs a new board from a FEN representation, discarding the side to move.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Board, FenParseError> {
        Board::parse_fen(fen).map(|(board, _)| board)
    }

    /// Constructs a new board from a FEN representation, along with the side to move if the FEN
    /// names one.
    pub fn parse_fen<S: AsRef<str>>(fen: S) -> Result<(Board, Option<Color>), FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let placement = fields.next().ok_or(FenParseError::Empty)?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != ROWS {
            return Err(FenParseError::WrongRankCount(ranks.len()));
        }

        let mut board = Board::new();
        let mut counts = [[0usize; 7]; 2];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                // digits 1 through 9 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value == 0 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    col += value as usize;
                    if col > COLS {
                        return Err(FenParseError::RankTooLong(row));
                    }

                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                if col >= COLS {
                    return Err(FenParseError::RankTooLong(row));
                }

                let count = &mut counts[piece.color.as_index()][piece.kind.as_index()];
                *count += 1;
                if *count > piece.kind.starting_count() {
                    return Err(FenParseError::TooManyPieces(piece));
                }

                board.set(Square::new(row, col), Some(piece));
                col += 1;
            }

            if col != COLS {
                return Err(FenParseError::RankTooShort(row));
            }
        }

        let side = match fields.next() {
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        Some(Color::try_from(c).map_err(|_| FenParseError::InvalidSideToMove)?)
                    }
                    _ => return Err(FenParseError::InvalidSideToMove),
                }
            }
            None => None,
        };

        Ok((board, side))
    }

    /// Produces the piece placement field of this board's FEN.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in 0..ROWS {
            let mut empty_squares = 0;
            for col in 0..COLS {
                if let Some(piece) = self.get(Square::new(row, col)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != ROWS - 1 {
                buf.push('/');
            }
        }

        buf
    }

    /// Produces this board's FEN followed by the given side to move.
    pub fn as_fen_with_side(&self, side: Color) -> String {
        format!("{} {}", self.as_fen(), side)
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                if let Some(piece) = self.get(Square::new(row, col)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", ROWS - 1 - row)?;
            if row == 4 {
                writeln!(f, "{}", "~".repeat(COLS * 3))?;
            }
        }

        for _ in 0..COLS {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for col in 0..COLS {
            write!(f, " {} ", (b'a' + col as u8) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
