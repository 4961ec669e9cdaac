// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Positional bonus tables. Every table is written from Red's point of view, row 0 being Black's
//! back rank; Black reads them through `Square::mirror`.
use crate::types::{Color, Piece, Square, TableIndex, COLS, ROWS};

pub type Table = [[i32; COLS]; ROWS];

#[rustfmt::skip]
const ROOK: Table = [
    [6, 8, 10, 12, 12, 12, 10, 8, 6],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [2, 4, 6, 8, 10, 8, 6, 4, 2],
    [0, 2, 4, 6, 8, 6, 4, 2, 0],
    [0, 0, 0, 2, 4, 2, 0, 0, 0],
];

#[rustfmt::skip]
const KNIGHT: Table = [
    [0, 2, 4, 6, 6, 6, 4, 2, 0],
    [2, 4, 6, 8, 8, 8, 6, 4, 2],
    [4, 6, 10, 12, 12, 12, 10, 6, 4],
    [6, 8, 12, 14, 14, 14, 12, 8, 6],
    [6, 8, 12, 14, 16, 14, 12, 8, 6],
    [6, 8, 12, 14, 16, 14, 12, 8, 6],
    [6, 8, 12, 14, 14, 14, 12, 8, 6],
    [4, 6, 10, 12, 12, 12, 10, 6, 4],
    [2, 4, 6, 8, 8, 8, 6, 4, 2],
    [0, 2, 4, 6, 6, 6, 4, 2, 0],
];

#[rustfmt::skip]
const ELEPHANT: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 2, 0, 0, 0, 2, 0, 0],
];

#[rustfmt::skip]
const ADVISOR: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 4, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 2, 0, 0, 0],
];

#[rustfmt::skip]
const KING: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 0, 0, 1, 2, 1, 0, 0, 0],
    [0, 0, 0, 2, 4, 2, 0, 0, 0],
];

#[rustfmt::skip]
const CANNON: Table = [
    [4, 6, 8, 10, 10, 10, 8, 6, 4],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [4, 6, 8, 10, 12, 10, 8, 6, 4],
    [2, 4, 6, 8, 10, 8, 6, 4, 2],
    [0, 2, 4, 6, 8, 6, 4, 2, 0],
    [0, 0, 2, 4, 6, 4, 2, 0, 0],
    [0, 0, 0, 2, 4, 2, 0, 0, 0],
];

// Pawns are worth little until they cross the river, and most just short of the last rank.
#[rustfmt::skip]
const PAWN: Table = [
    [0, 2, 4, 6, 6, 6, 4, 2, 0],
    [10, 12, 14, 18, 20, 18, 14, 12, 10],
    [10, 12, 14, 18, 20, 18, 14, 12, 10],
    [8, 10, 12, 14, 16, 14, 12, 10, 8],
    [6, 8, 10, 12, 14, 12, 10, 8, 6],
    [0, 0, 2, 0, 4, 0, 2, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

// Indexed by PieceKind.
static RED_TABLES: [Table; 7] = [ROOK, KNIGHT, ELEPHANT, ADVISOR, KING, CANNON, PAWN];

lazy_static! {
    static ref BLACK_TABLES: [Table; 7] = {
        let mut tables = [[[0; COLS]; ROWS]; 7];
        for (kind, table) in tables.iter_mut().enumerate() {
            for row in 0..ROWS {
                table[row] = RED_TABLES[kind][ROWS - 1 - row];
            }
        }
        tables
    };
}

/// Positional bonus for the given piece standing on the given square.
pub fn positional_bonus(piece: Piece, square: Square) -> i32 {
    let table = match piece.color {
        Color::Red => &RED_TABLES[piece.kind.as_index()],
        Color::Black => &BLACK_TABLES[piece.kind.as_index()],
    };

    table[square.row()][square.col()]
}
