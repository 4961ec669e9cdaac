// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::{Piece, Square};

/// A move from one square to another. Moves carry no knowledge of the pieces involved; that is
/// recorded in a `MoveRecord` once the move is applied to a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)
    }
}

/// Everything needed to exactly reverse a move applied to a board.
///
/// A record is produced by `Board::apply_move` and must be handed back to `Board::undo_move`
/// exactly once, in LIFO order with respect to other records from the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mov: Move,
    pub moved: Option<Piece>,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    pub fn source(&self) -> Square {
        self.mov.source()
    }

    pub fn destination(&self) -> Square {
        self.mov.destination()
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
