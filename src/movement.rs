// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal movement rules, one function per piece kind.
//!
//! Each function looks at the piece on the source square and returns the squares it may move to
//! under the geometry and blocking rules of its kind. None of them know about check or the
//! king-face rule; see `move_generator` for that. A function asked about a square that does not
//! hold a piece of its kind returns no destinations.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Piece, PieceKind, Square, TableIndex};

/// Destinations of a single piece. A rook or cannon in the open reaches at most 17 squares.
pub type Destinations = ArrayVec<[Square; 17]>;

/// Signature shared by all movement rules.
pub type MoveRule = fn(&Board, Square) -> Destinations;

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, 1),
    (2, -1),
];
const ELEPHANT_JUMPS: [(i32, i32); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

// Indexed by PieceKind.
static MOVE_RULES: [MoveRule; 7] = [
    rook_moves,
    knight_moves,
    elephant_moves,
    advisor_moves,
    king_moves,
    cannon_moves,
    pawn_moves,
];

/// Returns the movement rule for the given piece kind.
pub fn rule_for(kind: PieceKind) -> MoveRule {
    MOVE_RULES[kind.as_index()]
}

/// Pseudo-legal destinations of whatever piece stands on `src`.
pub fn destinations(board: &Board, src: Square) -> Destinations {
    match board.get(src) {
        Some(piece) => rule_for(piece.kind)(board, src),
        None => Destinations::new(),
    }
}

fn piece_of_kind(board: &Board, src: Square, kind: PieceKind) -> Option<Piece> {
    board.get(src).filter(|piece| piece.kind == kind)
}

// A piece may land on an empty square or an enemy piece, never on its own side.
fn can_land(board: &Board, piece: Piece, dst: Square) -> bool {
    match board.get(dst) {
        Some(target) => target.color != piece.color,
        None => true,
    }
}

pub fn rook_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Rook) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &ORTHOGONAL {
        let mut cursor = src.offset(dr, dc);
        while let Some(dst) = cursor {
            match board.get(dst) {
                None => moves.push(dst),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(dst);
                    }
                    break;
                }
            }

            cursor = dst.offset(dr, dc);
        }
    }

    moves
}

pub fn cannon_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Cannon) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &ORTHOGONAL {
        let mut screened = false;
        let mut cursor = src.offset(dr, dc);
        while let Some(dst) = cursor {
            match (board.get(dst), screened) {
                (None, false) => moves.push(dst),
                (Some(_), false) => screened = true,
                (None, true) => {}
                (Some(target), true) => {
                    // The first piece past the screen ends the ray, capturable or not.
                    if target.color != piece.color {
                        moves.push(dst);
                    }
                    break;
                }
            }

            cursor = dst.offset(dr, dc);
        }
    }

    moves
}

pub fn knight_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Knight) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &KNIGHT_JUMPS {
        let dst = match src.offset(dr, dc) {
            Some(dst) => dst,
            None => continue,
        };

        if let Some(leg) = knight_leg(src, dr, dc) {
            if board.is_empty(leg) && can_land(board, piece, dst) {
                moves.push(dst);
            }
        }
    }

    moves
}

/// The square a knight jumping `(dr, dc)` from `src` must pass through: one step along the long
/// axis of the jump.
pub fn knight_leg(src: Square, dr: i32, dc: i32) -> Option<Square> {
    if dr.abs() == 2 {
        src.offset(dr / 2, 0)
    } else {
        src.offset(0, dc / 2)
    }
}

pub fn elephant_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Elephant) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &ELEPHANT_JUMPS {
        let dst = match src.offset(dr, dc) {
            Some(dst) => dst,
            None => continue,
        };

        if !dst.on_home_side(piece.color) {
            continue;
        }

        if let Some(eye) = src.offset(dr / 2, dc / 2) {
            if board.is_empty(eye) && can_land(board, piece, dst) {
                moves.push(dst);
            }
        }
    }

    moves
}

pub fn advisor_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Advisor) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &DIAGONAL {
        if let Some(dst) = src.offset(dr, dc) {
            if dst.in_palace(piece.color) && can_land(board, piece, dst) {
                moves.push(dst);
            }
        }
    }

    moves
}

pub fn king_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::King) {
        Some(piece) => piece,
        None => return moves,
    };

    for &(dr, dc) in &ORTHOGONAL {
        if let Some(dst) = src.offset(dr, dc) {
            if dst.in_palace(piece.color) && can_land(board, piece, dst) {
                moves.push(dst);
            }
        }
    }

    moves
}

pub fn pawn_moves(board: &Board, src: Square) -> Destinations {
    let mut moves = Destinations::new();
    let piece = match piece_of_kind(board, src, PieceKind::Pawn) {
        Some(piece) => piece,
        None => return moves,
    };

    let mut steps: ArrayVec<[(i32, i32); 3]> = ArrayVec::new();
    steps.push((piece.color.forward(), 0));
    if !src.on_home_side(piece.color) {
        steps.push((0, -1));
        steps.push((0, 1));
    }

    for &(dr, dc) in &steps {
        if let Some(dst) = src.offset(dr, dc) {
            if can_land(board, piece, dst) {
                moves.push(dst);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    fn board_with(pieces: &[(usize, usize, PieceKind, Color)]) -> Board {
        let mut board = Board::new();
        for &(row, col, kind, color) in pieces {
            board.set(sq(row, col), Some(Piece::new(kind, color)));
        }
        board
    }

    #[test]
    fn rook_open_board() {
        let board = board_with(&[(5, 4, PieceKind::Rook, Color::Red)]);
        let moves = rook_moves(&board, sq(5, 4));
        assert_eq!(17, moves.len());
        assert!(moves.contains(&sq(0, 4)));
        assert!(moves.contains(&sq(9, 4)));
        assert!(moves.contains(&sq(5, 0)));
        assert!(moves.contains(&sq(5, 8)));
    }

    #[test]
    fn rook_stops_at_pieces() {
        let board = board_with(&[
            (5, 4, PieceKind::Rook, Color::Red),
            (5, 6, PieceKind::Pawn, Color::Black),
            (3, 4, PieceKind::Pawn, Color::Red),
        ]);
        let moves = rook_moves(&board, sq(5, 4));
        assert!(moves.contains(&sq(5, 5)));
        assert!(moves.contains(&sq(5, 6)));
        assert!(!moves.contains(&sq(5, 7)));
        assert!(moves.contains(&sq(4, 4)));
        assert!(!moves.contains(&sq(3, 4)));
        assert!(!moves.contains(&sq(2, 4)));
    }

    #[test]
    fn cannon_screen_counts() {
        // no screen: the enemy at (5,8) cannot be taken.
        let board = board_with(&[
            (5, 4, PieceKind::Cannon, Color::Red),
            (5, 8, PieceKind::Rook, Color::Black),
        ]);
        let moves = cannon_moves(&board, sq(5, 4));
        assert!(moves.contains(&sq(5, 7)));
        assert!(!moves.contains(&sq(5, 8)));

        // exactly one screen.
        let board = board_with(&[
            (5, 4, PieceKind::Cannon, Color::Red),
            (5, 6, PieceKind::Pawn, Color::Red),
            (5, 8, PieceKind::Rook, Color::Black),
        ]);
        let moves = cannon_moves(&board, sq(5, 4));
        assert!(moves.contains(&sq(5, 5)));
        assert!(!moves.contains(&sq(5, 6)));
        assert!(!moves.contains(&sq(5, 7)));
        assert!(moves.contains(&sq(5, 8)));

        // two screens.
        let board = board_with(&[
            (5, 4, PieceKind::Cannon, Color::Red),
            (5, 5, PieceKind::Pawn, Color::Black),
            (5, 6, PieceKind::Pawn, Color::Red),
            (5, 8, PieceKind::Rook, Color::Black),
        ]);
        let moves = cannon_moves(&board, sq(5, 4));
        assert!(!moves.contains(&sq(5, 8)));
        assert!(!moves.contains(&sq(5, 7)));
    }

    #[test]
    fn cannon_never_takes_own_piece() {
        let board = board_with(&[
            (5, 4, PieceKind::Cannon, Color::Red),
            (5, 6, PieceKind::Pawn, Color::Black),
            (5, 8, PieceKind::Pawn, Color::Red),
        ]);
        assert!(!cannon_moves(&board, sq(5, 4)).contains(&sq(5, 8)));
    }

    #[test]
    fn knight_leg_blocking() {
        let board = board_with(&[
            (5, 4, PieceKind::Knight, Color::Red),
            (4, 4, PieceKind::Pawn, Color::Black),
        ]);
        let moves = knight_moves(&board, sq(5, 4));
        assert!(!moves.contains(&sq(3, 3)));
        assert!(!moves.contains(&sq(3, 5)));
        for &dst in &[
            sq(4, 2),
            sq(4, 6),
            sq(6, 2),
            sq(6, 6),
            sq(7, 3),
            sq(7, 5),
        ] {
            assert!(moves.contains(&dst), "missing {}", dst);
        }
        assert_eq!(6, moves.len());
    }

    #[test]
    fn elephant_eye_and_river() {
        let board = board_with(&[
            (9, 2, PieceKind::Elephant, Color::Red),
            (8, 3, PieceKind::Pawn, Color::Red),
        ]);
        let moves = elephant_moves(&board, sq(9, 2));
        assert!(!moves.contains(&sq(7, 4)));
        assert!(moves.contains(&sq(7, 0)));

        let board = board_with(&[(5, 2, PieceKind::Elephant, Color::Red)]);
        let moves = elephant_moves(&board, sq(5, 2));
        assert!(moves.iter().all(|dst| dst.row() >= 5));
        assert_eq!(2, moves.len());
    }

    #[test]
    fn black_elephant_stays_home() {
        let board = board_with(&[(4, 2, PieceKind::Elephant, Color::Black)]);
        let moves = elephant_moves(&board, sq(4, 2));
        assert!(moves.iter().all(|dst| dst.row() <= 4));
        assert_eq!(2, moves.len());
    }

    #[test]
    fn advisor_palace() {
        let board = board_with(&[(9, 3, PieceKind::Advisor, Color::Red)]);
        let moves = advisor_moves(&board, sq(9, 3));
        assert_eq!(&[sq(8, 4)][..], &moves[..]);

        let board = board_with(&[(1, 4, PieceKind::Advisor, Color::Black)]);
        assert_eq!(4, advisor_moves(&board, sq(1, 4)).len());
    }

    #[test]
    fn king_palace() {
        let board = board_with(&[(7, 3, PieceKind::King, Color::Red)]);
        let moves = king_moves(&board, sq(7, 3));
        assert_eq!(2, moves.len());
        assert!(moves.contains(&sq(8, 3)));
        assert!(moves.contains(&sq(7, 4)));
    }

    #[test]
    fn pawn_before_and_after_river() {
        let board = board_with(&[(6, 4, PieceKind::Pawn, Color::Red)]);
        assert_eq!(&[sq(5, 4)][..], &pawn_moves(&board, sq(6, 4))[..]);

        let board = board_with(&[(4, 4, PieceKind::Pawn, Color::Red)]);
        let moves = pawn_moves(&board, sq(4, 4));
        assert_eq!(3, moves.len());
        assert!(moves.contains(&sq(3, 4)));
        assert!(moves.contains(&sq(4, 3)));
        assert!(moves.contains(&sq(4, 5)));
        assert!(!moves.contains(&sq(5, 4)));

        let board = board_with(&[(5, 0, PieceKind::Pawn, Color::Black)]);
        let moves = pawn_moves(&board, sq(5, 0));
        assert_eq!(2, moves.len());
        assert!(moves.contains(&sq(6, 0)));
        assert!(moves.contains(&sq(5, 1)));
    }

    #[test]
    fn pawn_on_last_rank() {
        let board = board_with(&[(0, 0, PieceKind::Pawn, Color::Red)]);
        assert_eq!(&[sq(0, 1)][..], &pawn_moves(&board, sq(0, 0))[..]);
    }

    #[test]
    fn kind_mismatch_is_empty() {
        let board = board_with(&[(5, 4, PieceKind::Rook, Color::Red)]);
        assert!(cannon_moves(&board, sq(5, 4)).is_empty());
        assert!(knight_moves(&board, sq(5, 4)).is_empty());
        assert!(rook_moves(&board, sq(0, 0)).is_empty());
        assert!(destinations(&board, sq(0, 0)).is_empty());
        assert_eq!(17, destinations(&board, sq(5, 4)).len());
    }
}
