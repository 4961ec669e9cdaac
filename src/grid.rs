// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A board as a 10x9 grid of two-symbol cell codes (`rR`, `bK`, ...), with `.` for an empty
//! square. The grid is also the JSON form of a board.
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::types::{squares, Piece, Square, TableIndex, COLS, ROWS};

pub const EMPTY_CODE: &str = ".";

pub type Grid = Vec<Vec<String>>;

#[derive(Debug)]
pub enum GridError {
    WrongRowCount(usize),
    WrongColumnCount { row: usize, len: usize },
    UnknownCode { square: Square, code: String },
    TooManyPieces(Piece),
    Json(serde_json::Error),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::WrongRowCount(n) => write!(f, "expected {} rows, got {}", ROWS, n),
            GridError::WrongColumnCount { row, len } => {
                write!(f, "expected {} columns in row {}, got {}", COLS, row, len)
            }
            GridError::UnknownCode { square, code } => {
                write!(f, "unknown cell code '{}' at {}", code, square)
            }
            GridError::TooManyPieces(piece) => write!(f, "too many pieces of kind '{}'", piece),
            GridError::Json(err) => write!(f, "invalid JSON grid: {}", err),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GridError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> GridError {
        GridError::Json(err)
    }
}

pub fn empty_grid() -> Grid {
    vec![vec![EMPTY_CODE.to_owned(); COLS]; ROWS]
}

pub fn to_grid(board: &Board) -> Grid {
    let mut grid = empty_grid();
    for (sq, piece) in board.occupied() {
        grid[sq.row()][sq.col()] = piece.code();
    }

    grid
}

pub fn from_grid<S: AsRef<str>>(grid: &[Vec<S>]) -> Result<Board, GridError> {
    if grid.len() != ROWS {
        return Err(GridError::WrongRowCount(grid.len()));
    }

    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != COLS {
            return Err(GridError::WrongColumnCount {
                row,
                len: cells.len(),
            });
        }
    }

    let mut board = Board::new();
    let mut counts = [[0usize; 7]; 2];
    for sq in squares() {
        let code = grid[sq.row()][sq.col()].as_ref();
        if code == EMPTY_CODE {
            continue;
        }

        let piece = Piece::from_code(code).ok_or_else(|| GridError::UnknownCode {
            square: sq,
            code: code.to_owned(),
        })?;

        let count = &mut counts[piece.color.as_index()][piece.kind.as_index()];
        *count += 1;
        if *count > piece.kind.starting_count() {
            return Err(GridError::TooManyPieces(piece));
        }

        board.set(sq, Some(piece));
    }

    Ok(board)
}

pub fn to_json(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string(&to_grid(board))
}

pub fn from_json(json: &str) -> Result<Board, GridError> {
    let grid: Grid = serde_json::from_str(json)?;
    from_grid(&grid)
}
