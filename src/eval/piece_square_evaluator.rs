// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::pst;
use crate::eval::BoardEvaluator;
use crate::types::{Color, PieceKind};

const KING_WEIGHT: i32 = 100_000;
const ROOK_WEIGHT: i32 = 600;
const CANNON_WEIGHT: i32 = 450;
const KNIGHT_WEIGHT: i32 = 350;
const ELEPHANT_WEIGHT: i32 = 250;
const ADVISOR_WEIGHT: i32 = 250;
const PAWN_WEIGHT: i32 = 100;

/// Material value of a piece kind.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => KING_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Cannon => CANNON_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Elephant => ELEPHANT_WEIGHT,
        PieceKind::Advisor => ADVISOR_WEIGHT,
        PieceKind::Pawn => PAWN_WEIGHT,
    }
}

/// Scores a board as material plus a positional bonus for every piece.
pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    pub fn new() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }
}

impl Default for PieceSquareEvaluator {
    fn default() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }
}

impl BoardEvaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color) -> i32 {
        board
            .occupied()
            .map(|(sq, piece)| {
                let value = piece_value(piece.kind) + pst::positional_bonus(piece, sq);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}
