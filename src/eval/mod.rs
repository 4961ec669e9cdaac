// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::types::Color;

mod piece_square_evaluator;
mod pst;
mod score;

pub use piece_square_evaluator::{piece_value, PieceSquareEvaluator};
pub use pst::positional_bonus;
pub use score::Score;

/// A static evaluation function. Larger values favor `perspective`.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, board: &Board, perspective: Color) -> i32;
}

/// Evaluates a board with the default evaluator.
pub fn evaluate_board(board: &Board, perspective: Color) -> i32 {
    PieceSquareEvaluator::new().evaluate(board, perspective)
}
