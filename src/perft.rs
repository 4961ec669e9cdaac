// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::types::Color;

/// Counts the legal move paths of length `depth` from this position with `color` to move. Root
/// moves are counted in parallel, each on its own copy of the board.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = board.clone();
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(&mut root, color, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut child = board.clone();
            child.apply_move(mov);
            perft_serial(&mut child, color.toggle(), depth - 1)
        })
        .sum()
}

fn perft_serial(board: &mut Board, color: Color, depth: u32) -> u64 {
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(board, color, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut count = 0;
    for mov in moves {
        let mut child = board.scoped_move(mov);
        count += perft_serial(&mut child, color.toggle(), depth - 1);
    }

    count
}
