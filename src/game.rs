// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::time::Duration;

use crate::attacks;
use crate::board::{Board, FenParseError};
use crate::move_generator::{IllegalMove, MoveGenerator, MoveVec};
use crate::moves::{Move, MoveRecord};
use crate::search;
use crate::types::{Color, Piece, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        match self {
            GameStatus::Checkmate | GameStatus::Stalemate => true,
            GameStatus::Ongoing | GameStatus::Check => false,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GameStatus::Ongoing => "ONGOING",
            GameStatus::Check => "CHECK",
            GameStatus::Checkmate => "CHECKMATE",
            GameStatus::Stalemate => "STALEMATE",
        };
        f.write_str(name)
    }
}

/// What happened when a move was made.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mov: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub status: GameStatus,
}

/// A game in progress: a board, the side to move, the status that follows from them, and the
/// history of moves that led here.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Game {
    /// Starts a new game from the standard position with Red to move.
    pub fn new() -> Game {
        Game::from_board(Board::from_start_position(), Color::Red)
    }

    /// Starts a game from the given board. The status is computed from the position.
    pub fn from_board(board: Board, turn: Color) -> Game {
        let mut game = Game {
            board,
            turn,
            status: GameStatus::Ongoing,
            history: vec![],
        };
        game.update_status();
        game
    }

    /// Starts a game from a FEN string. Red moves if the FEN does not say.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Game, FenParseError> {
        let (board, side) = Board::parse_fen(fen)?;
        Ok(Game::from_board(board, side.unwrap_or(Color::Red)))
    }

    pub fn as_fen(&self) -> String {
        self.board.as_fen_with_side(self.turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> MoveVec {
        let mut board = self.board.clone();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&mut board, self.turn, &mut moves);
        moves
    }

    /// Legal moves for the side to move that start on `square`. Empty if the square is empty or
    /// holds an opponent's piece.
    pub fn legal_moves_from(&self, square: Square) -> MoveVec {
        self.legal_moves()
            .into_iter()
            .filter(|mov| mov.source() == square)
            .collect()
    }

    /// The winner of a finished game. A side with no legal moves loses, whether or not it is in
    /// check.
    pub fn winner(&self) -> Option<Color> {
        if self.status.is_over() {
            Some(self.turn.toggle())
        } else {
            None
        }
    }

    /// Makes a move for the side to move. An illegal move leaves the game untouched.
    pub fn make_move(&mut self, mov: Move) -> Result<MoveOutcome, IllegalMove> {
        MoveGenerator::new().check_move(&mut self.board, mov, self.turn)?;
        let moved = self.board.get(mov.source()).ok_or(IllegalMove::EmptySource)?;
        let record = self.board.apply_move(mov);
        self.history.push(record);
        self.turn = self.turn.toggle();
        self.update_status();
        debug!("{} played {}, status {}", self.turn.toggle(), mov, self.status);
        Ok(MoveOutcome {
            mov,
            moved,
            captured: record.captured,
            status: self.status,
        })
    }

    /// Takes back the last move, returning its record, or `None` if no moves have been made.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.board.undo_move(record);
        self.turn = self.turn.toggle();
        self.update_status();
        Some(record)
    }

    /// Thinking time for the side to move when none is given: more pieces, more time.
    pub fn dynamic_time_limit(&self) -> Duration {
        let pieces = self.board.piece_count();
        if pieces >= 24 {
            Duration::from_millis(5000)
        } else if pieces >= 12 {
            Duration::from_millis(3000)
        } else {
            Duration::from_millis(1500)
        }
    }

    /// Searches `depth` plies and plays the best move found. Returns `None` if the side to move
    /// has no legal moves.
    pub fn ai_move_minimax(&mut self, depth: u32) -> Option<MoveOutcome> {
        let mov = search::find_best_move(&mut self.board, self.turn, depth)?;
        self.make_move(mov).ok()
    }

    /// Searches by iterative deepening within the time limit, or `dynamic_time_limit` if none is
    /// given, and plays the best move found. A `max_depth` of zero searches one ply, as
    /// `ai_move_minimax` does. Returns `None` if no depth completed in time or the side to move
    /// has no legal moves.
    pub fn ai_move_time(&mut self, time_limit: Option<Duration>, max_depth: u32) -> Option<MoveOutcome> {
        let limit = time_limit.unwrap_or_else(|| self.dynamic_time_limit());
        let mov = search::best_move_with_time_limit(&mut self.board, self.turn, max_depth, limit)?;
        self.make_move(mov).ok()
    }

    fn update_status(&mut self) {
        let in_check = attacks::is_in_check(&self.board, self.turn);
        let has_moves = !self.legal_moves().is_empty();
        self.status = match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        };
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
