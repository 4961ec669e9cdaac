// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check detection and the king-face rule.
use std::cmp::{max, min};

use crate::board::Board;
use crate::movement;
use crate::types::{Color, PieceKind, Square};

/// Returns the square of the given color's king, if it is on the board.
pub fn find_king(board: &Board, color: Color) -> Option<Square> {
    board.king(color)
}

/// Returns whether the piece standing on `src` could move to `dst` under its pseudo-legal
/// movement rule. Sliding and jumping pieces are tested geometrically rather than by generating
/// their full destination sets.
pub fn attacks_square(board: &Board, src: Square, dst: Square) -> bool {
    let piece = match board.get(src) {
        Some(piece) => piece,
        None => return false,
    };

    if src == dst {
        return false;
    }

    if let Some(target) = board.get(dst) {
        if target.color == piece.color {
            return false;
        }
    }

    match piece.kind {
        PieceKind::Rook => same_line(src, dst) && pieces_between(board, src, dst) == 0,
        PieceKind::Cannon => {
            // A cannon only passes a screen to capture; an empty target needs a clear line.
            let needed = if board.is_empty(dst) { 0 } else { 1 };
            same_line(src, dst) && pieces_between(board, src, dst) == needed
        }
        PieceKind::Knight => knight_attacks(board, src, dst),
        PieceKind::Pawn => pawn_attacks(piece.color, src, dst),
        PieceKind::Elephant | PieceKind::Advisor | PieceKind::King => {
            movement::destinations(board, src).contains(&dst)
        }
    }
}

fn same_line(a: Square, b: Square) -> bool {
    a.row() == b.row() || a.col() == b.col()
}

/// Counts the pieces strictly between two squares on the same row or column.
fn pieces_between(board: &Board, a: Square, b: Square) -> usize {
    if a.row() == b.row() {
        let (lo, hi) = (min(a.col(), b.col()), max(a.col(), b.col()));
        (lo + 1..hi)
            .filter(|&col| !board.is_empty(Square::new(a.row(), col)))
            .count()
    } else {
        debug_assert_eq!(a.col(), b.col());
        let (lo, hi) = (min(a.row(), b.row()), max(a.row(), b.row()));
        (lo + 1..hi)
            .filter(|&row| !board.is_empty(Square::new(row, a.col())))
            .count()
    }
}

fn knight_attacks(board: &Board, src: Square, dst: Square) -> bool {
    let dr = dst.row() as i32 - src.row() as i32;
    let dc = dst.col() as i32 - src.col() as i32;
    let is_jump = (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2);
    if !is_jump {
        return false;
    }

    match movement::knight_leg(src, dr, dc) {
        Some(leg) => board.is_empty(leg),
        None => false,
    }
}

fn pawn_attacks(color: Color, src: Square, dst: Square) -> bool {
    let dr = dst.row() as i32 - src.row() as i32;
    let dc = dst.col() as i32 - src.col() as i32;
    if dr == color.forward() && dc == 0 {
        return true;
    }

    dr == 0 && dc.abs() == 1 && !src.on_home_side(color)
}

/// Returns whether the king of the given color is attacked by any enemy piece. A board without
/// that king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = match find_king(board, color) {
        Some(king) => king,
        None => return false,
    };

    board
        .pieces(color.toggle())
        .any(|(sq, _)| attacks_square(board, sq, king))
}

/// Returns whether both kings stand on the same column with nothing between them.
pub fn kings_face_each_other(board: &Board) -> bool {
    match (board.king(Color::Red), board.king(Color::Black)) {
        (Some(red), Some(black)) => {
            red.col() == black.col() && pieces_between(board, red, black) == 0
        }
        _ => false,
    }
}
