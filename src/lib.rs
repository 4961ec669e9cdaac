// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A Xiangqi rules engine and alpha-beta searcher.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod board;
pub mod eval;
mod game;
pub mod grid;
mod move_generator;
pub mod movement;
mod moves;
mod perft;
pub mod search;
mod types;

pub use board::{Board, FenParseError, ScopedMove, START_FEN};
pub use game::{Game, GameStatus, MoveOutcome};
pub use move_generator::{generate_legal_moves, is_legal_move, IllegalMove, MoveGenerator, MoveVec};
pub use moves::{Move, MoveRecord};
pub use perft::perft;
pub use types::{
    in_bounds, in_palace, squares, Color, Piece, PieceKind, Square, TableIndex, COLORS, COLS, PIECE_KINDS,
    ROWS,
};
