// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::Duration;

use xiangqi::{Color, Game, GameStatus, Move, PieceKind, Square, START_FEN};

fn mv(src: (usize, usize), dst: (usize, usize)) -> Move {
    Move::new(Square::new(src.0, src.1), Square::new(dst.0, dst.1))
}

#[test]
fn new_game() {
    let game = Game::new();
    assert_eq!(Color::Red, game.turn());
    assert_eq!(GameStatus::Ongoing, game.status());
    assert_eq!(START_FEN, game.as_fen());
    assert_eq!(44, game.legal_moves().len());
    assert_eq!(None, game.winner());
}

#[test]
fn opening_moves() {
    let mut game = Game::new();
    let outcome = game.make_move(mv((7, 1), (7, 4))).unwrap();
    assert_eq!(PieceKind::Cannon, outcome.moved.kind);
    assert_eq!(GameStatus::Ongoing, outcome.status);
    assert_eq!(Color::Black, game.turn());

    // black cannot move a red piece, and red has already moved.
    assert!(game.make_move(mv((9, 1), (7, 2))).is_err());
    let outcome = game.make_move(mv((0, 7), (2, 6))).unwrap();
    assert_eq!(PieceKind::Knight, outcome.moved.kind);
    assert_eq!(Color::Red, game.turn());
    assert_eq!(
        "rneakae1r/9/1c4nc1/p1p1p1p1p/9/9/P1P1P1P1P/4C2C1/9/RNEAKAENR r",
        game.as_fen()
    );
}

#[test]
fn capture_is_reported() {
    let mut game = Game::new();
    let outcome = game.make_move(mv((7, 1), (0, 1))).unwrap();
    let captured = outcome.captured.unwrap();
    assert_eq!(PieceKind::Knight, captured.kind);
    assert_eq!(Color::Black, captured.color);
    assert_eq!(31, game.board().piece_count());
    assert!(game.history()[0].is_capture());
}

#[test]
fn fen_side_to_move() {
    let game = Game::from_fen("4k4/9/9/9/9/8R/9/9/9/3K5 b").unwrap();
    assert_eq!(Color::Black, game.turn());
    let game = Game::from_fen("4k4/9/9/9/9/8R/9/9/9/3K5").unwrap();
    assert_eq!(Color::Red, game.turn());
    assert!(Game::from_fen("4k4/9/9/9/9/8R/9/9/9/3K5 x").is_err());
}

#[test]
fn ai_plies_then_undo_everything() {
    let mut game = Game::new();
    let mut played = 0;
    for _ in 0..4 {
        let mover = game.turn();
        let outcome = game.ai_move_minimax(1).unwrap();
        assert_eq!(mover, outcome.moved.color);
        assert_eq!(mover.toggle(), game.turn());
        played += 1;
    }

    assert_eq!(played, game.history().len());
    while game.undo().is_some() {}
    assert_eq!(START_FEN, game.as_fen());
    assert_eq!(GameStatus::Ongoing, game.status());
}

#[test]
fn ai_move_with_time_limit() {
    let mut game = Game::new();
    let outcome = game.ai_move_time(Some(Duration::from_secs(600)), 1).unwrap();
    assert_eq!(Color::Red, outcome.moved.color);
    assert_eq!(Color::Black, game.turn());
}

#[test]
fn ai_out_of_time_plays_nothing() {
    let mut game = Game::new();
    assert_eq!(None, game.ai_move_time(Some(Duration::from_secs(0)), 3));
    assert_eq!(START_FEN, game.as_fen());
    assert!(game.history().is_empty());
}

#[test]
fn ai_delivers_mate() {
    let mut game = Game::from_fen("4k4/R8/9/9/9/8R/9/9/9/3K5 r").unwrap();
    let outcome = game.ai_move_time(None, 3).unwrap();
    assert_eq!(GameStatus::Checkmate, outcome.status);
    assert_eq!(Some(Color::Red), game.winner());
    assert!(game.status().is_over());
}

#[test]
fn status_serializes_by_name() {
    assert_eq!("\"CHECKMATE\"", serde_json::to_string(&GameStatus::Checkmate).unwrap());
    let status: GameStatus = serde_json::from_str("\"STALEMATE\"").unwrap();
    assert_eq!(GameStatus::Stalemate, status);
}

#[test]
fn ai_move_with_unbounded_time_limit() {
    let mut game = Game::new();
    let outcome = game.ai_move_time(Some(Duration::from_secs(u64::max_value())), 1).unwrap();
    assert_eq!(Color::Red, outcome.moved.color);
}
