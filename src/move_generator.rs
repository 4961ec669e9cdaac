// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

use arrayvec::ArrayVec;

use crate::attacks;
use crate::board::Board;
use crate::movement;
use crate::moves::Move;
use crate::types::Color;

/// A list of moves for one side. No Xiangqi position comes close to filling it.
pub type MoveVec = ArrayVec<[Move; 256]>;

/// Reasons a move is rejected, in the order they are checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    EmptySource,
    WrongColor,
    InvalidDestination,
    KingsFacing,
    LeavesKingInCheck,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IllegalMove::EmptySource => write!(f, "no piece on the source square"),
            IllegalMove::WrongColor => write!(f, "piece does not belong to the side to move"),
            IllegalMove::InvalidDestination => write!(f, "piece cannot move to that square"),
            IllegalMove::KingsFacing => write!(f, "move would leave the kings facing each other"),
            IllegalMove::LeavesKingInCheck => write!(f, "move would leave the king in check"),
        }
    }
}

impl Error for IllegalMove {}

pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every legal move for `color`, row-major by source square and then in the order
    /// the piece's movement rule yields destinations.
    pub fn generate_moves(&self, board: &mut Board, color: Color, moves: &mut MoveVec) {
        self.generate_filtered(board, color, moves, false)
    }

    /// Generates the legal moves for `color` that land on an occupied square.
    pub fn generate_captures(&self, board: &mut Board, color: Color, moves: &mut MoveVec) {
        self.generate_filtered(board, color, moves, true)
    }

    fn generate_filtered(
        &self,
        board: &mut Board,
        color: Color,
        moves: &mut MoveVec,
        captures_only: bool,
    ) {
        let mut pseudo = MoveVec::new();
        for (src, _) in board.pieces(color) {
            for dst in movement::destinations(board, src) {
                if captures_only && board.is_empty(dst) {
                    continue;
                }

                pseudo.push(Move::new(src, dst));
            }
        }

        for mov in pseudo {
            if self.is_legal_given_pseudolegal(board, mov, color) {
                moves.push(mov);
            }
        }
    }

    /// Checks a move against every rule, returning the first one it breaks. The board is left
    /// exactly as it was found.
    pub fn check_move(&self, board: &mut Board, mov: Move, color: Color) -> Result<(), IllegalMove> {
        let piece = board.get(mov.source()).ok_or(IllegalMove::EmptySource)?;
        if piece.color != color {
            return Err(IllegalMove::WrongColor);
        }

        if !movement::destinations(board, mov.source()).contains(&mov.destination()) {
            return Err(IllegalMove::InvalidDestination);
        }

        self.check_side_conditions(board, mov, color)
    }

    pub fn is_legal_move(&self, board: &mut Board, mov: Move, color: Color) -> bool {
        self.check_move(board, mov, color).is_ok()
    }

    fn is_legal_given_pseudolegal(&self, board: &mut Board, mov: Move, color: Color) -> bool {
        self.check_side_conditions(board, mov, color).is_ok()
    }

    fn check_side_conditions(
        &self,
        board: &mut Board,
        mov: Move,
        color: Color,
    ) -> Result<(), IllegalMove> {
        let child = board.scoped_move(mov);
        if attacks::kings_face_each_other(&child) {
            return Err(IllegalMove::KingsFacing);
        }

        if attacks::is_in_check(&child, color) {
            return Err(IllegalMove::LeavesKingInCheck);
        }

        Ok(())
    }
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

/// Returns whether `mov` is legal for `color` on this board.
pub fn is_legal_move(board: &mut Board, mov: Move, color: Color) -> bool {
    MoveGenerator::new().is_legal_move(board, mov, color)
}

/// Returns every legal move for `color` on this board.
pub fn generate_legal_moves(board: &mut Board, color: Color) -> MoveVec {
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    moves
}
