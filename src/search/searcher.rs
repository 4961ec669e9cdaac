// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::{max, min, Reverse};
use std::time::{Duration, Instant};

use crate::attacks;
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::eval::{piece_value, BoardEvaluator, PieceSquareEvaluator, Score};
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::search::{DataRecorder, NullDataRecorder, Record, SearchConfig};
use crate::types::Color;

const CAPTURE_BONUS: i32 = 10000;
const CHECK_BONUS: i32 = 500;

/// The outcome of a search. `depth` is the deepest iteration that ran to completion; a depth of
/// zero means none did and `best_move` is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub depth: u32,
    pub nodes_searched: u64,
}

impl SearchResult {
    fn empty() -> SearchResult {
        SearchResult {
            best_move: None,
            score: Score::Evaluated(0),
            depth: 0,
            nodes_searched: 0,
        }
    }
}

/// Raised by any node that observes the deadline has passed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Cancelled;

macro_rules! cancel_poll {
    ($search:expr) => {
        if $search.out_of_time() {
            return Err(Cancelled);
        }
    };
}

/// A minimax searcher with alpha-beta pruning, generic over the evaluation function.
pub struct Searcher<E> {
    evaluator: E,
    config: SearchConfig,
}

impl<E: BoardEvaluator> Searcher<E> {
    pub fn new(config: SearchConfig) -> Searcher<E> {
        Searcher::with_evaluator(Default::default(), config)
    }

    pub fn with_evaluator(evaluator: E, config: SearchConfig) -> Searcher<E> {
        Searcher { evaluator, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches exactly `depth` plies with no deadline. At least one ply is always searched.
    pub fn search_depth(&self, board: &mut Board, color: Color, depth: u32) -> SearchResult {
        let mut search = Search::new(self, color, None);
        let depth = max(depth, 1);
        match search.root(board, depth) {
            Ok((best_move, score)) => SearchResult {
                best_move,
                score,
                depth,
                nodes_searched: search.stats.nodes,
            },
            // Without a deadline nothing can cancel the search.
            Err(Cancelled) => SearchResult::empty(),
        }
    }

    /// Runs an iterative deepening search using the configured depth and time budget.
    pub fn search(&self, board: &mut Board, color: Color) -> SearchResult {
        self.search_with_recorder(board, color, &NullDataRecorder)
    }

    /// Runs an iterative deepening search, handing statistics for every completed depth to the
    /// given recorder.
    pub fn search_with_recorder(
        &self,
        board: &mut Board,
        color: Color,
        recorder: &dyn DataRecorder,
    ) -> SearchResult {
        self.iterative_deepening(
            board,
            color,
            self.config.max_depth,
            self.config.time_budget(),
            recorder,
        )
    }

    /// Searches depth 1, 2, ... up to `max_depth` against a single deadline, returning the result
    /// of the deepest depth that completed. A budget of `None`, or one too large to represent as a
    /// deadline, never expires. As with `search_depth`, at least one ply is attempted.
    pub fn search_with_time_limit(
        &self,
        board: &mut Board,
        color: Color,
        max_depth: u32,
        time_limit: Option<Duration>,
    ) -> SearchResult {
        self.iterative_deepening(board, color, max_depth, time_limit, &NullDataRecorder)
    }

    fn iterative_deepening(
        &self,
        board: &mut Board,
        color: Color,
        max_depth: u32,
        time_limit: Option<Duration>,
        recorder: &dyn DataRecorder,
    ) -> SearchResult {
        let start_time = Instant::now();
        let deadline = time_limit.and_then(|limit| start_time.checked_add(limit));
        let mut result = SearchResult::empty();
        let mut nodes = 0;
        for depth in 1..=max(max_depth, 1) {
            debug!("beginning search of depth {}", depth);
            let mut search = Search::new(self, color, deadline);
            let outcome = search.root(board, depth);
            nodes += search.stats.nodes;
            let (best_move, score) = match outcome {
                Ok(completed) => completed,
                Err(Cancelled) => {
                    debug!("search of depth {} cancelled by deadline", depth);
                    break;
                }
            };

            result = SearchResult {
                best_move,
                score,
                depth,
                nodes_searched: nodes,
            };

            search.stats.depth = depth;
            search.stats.best_move = best_move.map(|m| m.to_string()).unwrap_or_default();
            search.stats.score = score.to_string();
            search.stats.elapsed_ms = elapsed_ms(start_time);
            recorder.record(board, color, &search.stats);
            info!(
                "depth {}: best move {} score {} ({} nodes, {} ms)",
                depth,
                search.stats.best_move,
                score,
                search.stats.nodes,
                search.stats.elapsed_ms
            );

            // A forced result will not change with more depth.
            if best_move.is_none() || score.is_decisive() {
                break;
            }
        }

        result.nodes_searched = nodes;
        result
    }
}

impl<E: BoardEvaluator> Default for Searcher<E> {
    fn default() -> Searcher<E> {
        Searcher::new(Default::default())
    }
}

impl Searcher<PieceSquareEvaluator> {
    pub fn with_config(config: SearchConfig) -> Searcher<PieceSquareEvaluator> {
        Searcher::new(config)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    let elapsed = start.elapsed();
    elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis())
}

/// Orders moves so that captures of valuable pieces come first, followed by checks, followed by
/// everything else. Ties keep their generation order.
pub fn order_moves(board: &mut Board, moves: &mut MoveVec, color: Color) {
    // The generation index breaks ties, so the unstable sort is stable and needs no buffer.
    let mut scored: ArrayVec<[(i32, usize, Move); 256]> = moves
        .iter()
        .enumerate()
        .map(|(idx, &mov)| (move_score(board, mov, color), idx, mov))
        .collect();
    scored.sort_unstable_by_key(|&(score, idx, _)| (Reverse(score), idx));
    moves.clear();
    moves.extend(scored.into_iter().map(|(_, _, mov)| mov));
}

/// The ordering score of a single move for `color`.
pub fn move_score(board: &mut Board, mov: Move, color: Color) -> i32 {
    let mut score = 0;
    if let Some(victim) = board.get(mov.destination()) {
        score += CAPTURE_BONUS + piece_value(victim.kind);
    }

    let child = board.scoped_move(mov);
    if attacks::is_in_check(&child, color.toggle()) {
        score += CHECK_BONUS;
    }

    score
}

/// The state of a single search to a fixed depth. Scores are always from the point of view of
/// `ai_color`, which is the maximizing side.
struct Search<'a, E> {
    searcher: &'a Searcher<E>,
    ai_color: Color,
    deadline: Option<Instant>,
    stats: Record,
}

impl<'a, E: BoardEvaluator> Search<'a, E> {
    fn new(searcher: &'a Searcher<E>, ai_color: Color, deadline: Option<Instant>) -> Search<'a, E> {
        Search {
            searcher,
            ai_color,
            deadline,
            stats: Default::default(),
        }
    }

    fn out_of_time(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    fn config(&self) -> &SearchConfig {
        &self.searcher.config
    }

    fn evaluate(&self, board: &Board) -> Score {
        Score::Evaluated(self.searcher.evaluator.evaluate(board, self.ai_color))
    }

    fn legal_moves(&self, board: &mut Board, turn: Color) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(board, turn, &mut moves);
        if self.config().move_ordering {
            order_moves(board, &mut moves, turn);
        }

        moves
    }

    /// The score of a position where `turn` has no legal moves.
    fn terminal_score(&self, in_check: bool, turn: Color) -> Score {
        if !in_check && !self.config().stalemate_is_loss {
            return Score::Evaluated(0);
        }

        if turn == self.ai_color {
            Score::Loss
        } else {
            -Score::Loss
        }
    }

    /// Searches every root move, returning the best one along with its score. Ties go to the
    /// move searched first.
    fn root(&mut self, board: &mut Board, depth: u32) -> Result<(Option<Move>, Score), Cancelled> {
        cancel_poll!(self);
        self.stats.nodes += 1;
        let ai_color = self.ai_color;
        let moves = self.legal_moves(board, ai_color);
        if moves.is_empty() {
            let in_check = attacks::is_in_check(board, ai_color);
            return Ok((None, self.terminal_score(in_check, ai_color)));
        }

        let mut best_move = None;
        let mut best_score = Score::Loss;
        let mut alpha = Score::Loss;
        for mov in moves {
            cancel_poll!(self);
            let score = {
                let mut child = board.scoped_move(mov);
                self.minimax(
                    &mut child,
                    ai_color.toggle(),
                    false,
                    depth - 1,
                    alpha,
                    Score::Win,
                )?
            };

            if best_move.is_none() || score > best_score {
                best_move = Some(mov);
                best_score = score;
            }

            alpha = max(alpha, score);
            if best_score == Score::Win {
                break;
            }
        }

        Ok((best_move, best_score))
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        turn: Color,
        maximizing: bool,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, Cancelled> {
        cancel_poll!(self);
        self.stats.nodes += 1;
        if depth == 0 {
            // Mates on the horizon are still mates.
            if attacks::is_in_check(board, turn) && self.legal_moves(board, turn).is_empty() {
                return Ok(self.terminal_score(true, turn));
            }

            let quiescence_depth = self.config().quiescence_depth;
            if quiescence_depth == 0 {
                return Ok(self.evaluate(board));
            }

            return self.quiesce(board, turn, maximizing, quiescence_depth, alpha, beta);
        }

        let moves = self.legal_moves(board, turn);
        if moves.is_empty() {
            let in_check = attacks::is_in_check(board, turn);
            return Ok(self.terminal_score(in_check, turn));
        }

        let mut best = if maximizing { Score::Loss } else { Score::Win };
        for mov in moves {
            cancel_poll!(self);
            let score = {
                let mut child = board.scoped_move(mov);
                self.minimax(&mut child, turn.toggle(), !maximizing, depth - 1, alpha, beta)?
            };

            if maximizing {
                best = max(best, score);
                alpha = max(alpha, score);
            } else {
                best = min(best, score);
                beta = min(beta, score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }

    /// Capture-only search past the horizon. The static evaluation of the position bounds the
    /// score from the moving side's point of view, since that side may decline every capture.
    fn quiesce(
        &mut self,
        board: &mut Board,
        turn: Color,
        maximizing: bool,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, Cancelled> {
        cancel_poll!(self);
        self.stats.quiescence_nodes += 1;
        let stand_pat = self.evaluate(board);
        if depth == 0 {
            return Ok(stand_pat);
        }

        if maximizing {
            alpha = max(alpha, stand_pat);
        } else {
            beta = min(beta, stand_pat);
        }

        if alpha >= beta {
            return Ok(if maximizing { alpha } else { beta });
        }

        let mut captures = MoveVec::new();
        MoveGenerator::new().generate_captures(board, turn, &mut captures);
        if self.config().move_ordering {
            order_moves(board, &mut captures, turn);
        }

        let mut best = if maximizing { alpha } else { beta };
        for mov in captures {
            cancel_poll!(self);
            let score = {
                let mut child = board.scoped_move(mov);
                self.quiesce(&mut child, turn.toggle(), !maximizing, depth - 1, alpha, beta)?
            };

            if maximizing {
                best = max(best, score);
                alpha = max(alpha, score);
            } else {
                best = min(best, score);
                beta = min(beta, score);
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn mv(src: (usize, usize), dst: (usize, usize)) -> Move {
        Move::new(Square::new(src.0, src.1), Square::new(dst.0, dst.1))
    }

    fn searcher() -> Searcher<PieceSquareEvaluator> {
        Searcher::with_config(SearchConfig::default())
    }

    #[test]
    fn ordering_prefers_valuable_captures() {
        // Red rook on (5,4) can take a black cannon at (5,0) or a black pawn at (5,8).
        let mut board = Board::from_fen("3k5/9/9/9/9/c3R3p/9/9/9/5K3 r").unwrap();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&mut board, Color::Red, &mut moves);
        order_moves(&mut board, &mut moves, Color::Red);
        assert_eq!(mv((5, 4), (5, 0)), moves[0]);
        assert_eq!(mv((5, 4), (5, 8)), moves[1]);
        assert!(move_score(&mut board, moves[0], Color::Red) > move_score(&mut board, moves[1], Color::Red));
    }

    #[test]
    fn ordering_rewards_checks() {
        let mut board = Board::from_fen("3k5/9/9/9/9/4R4/9/9/9/5K3 r").unwrap();
        assert_eq!(500, move_score(&mut board, mv((5, 4), (5, 3)), Color::Red));
        assert_eq!(0, move_score(&mut board, mv((5, 4), (5, 2)), Color::Red));
    }

    #[test]
    fn finds_mate_in_one() {
        let mut board = Board::from_fen("4k4/R8/9/9/9/8R/9/9/9/3K5 r").unwrap();
        let before = board.clone();
        let result = searcher().search_depth(&mut board, Color::Red, 1);
        assert_eq!(Some(mv((5, 8), (0, 8))), result.best_move);
        assert_eq!(Score::Win, result.score);
        assert_eq!(before, board);
    }

    #[test]
    fn takes_hanging_rook() {
        let mut board = Board::from_fen("3k5/9/9/9/9/r3R4/9/9/9/5K3 r").unwrap();
        let result = searcher().search_depth(&mut board, Color::Red, 2);
        assert_eq!(Some(mv((5, 4), (5, 0))), result.best_move);
    }

    #[test]
    fn stalemate_scoring_follows_config() {
        let mut board = Board::from_fen("4k4/R8/9/9/9/5R3/9/9/9/3K5 b").unwrap();
        let result = searcher().search_depth(&mut board, Color::Black, 2);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::Loss, result.score);

        let config = SearchConfig {
            stalemate_is_loss: false,
            ..Default::default()
        };
        let result = Searcher::with_config(config).search_depth(&mut board, Color::Black, 2);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::Evaluated(0), result.score);
    }

    #[test]
    fn zero_budget_returns_nothing() {
        let mut board = Board::from_start_position();
        let result =
            searcher().search_with_time_limit(&mut board, Color::Red, 3, Some(Duration::from_secs(0)));
        assert_eq!(None, result.best_move);
        assert_eq!(0, result.depth);
        assert_eq!(Board::from_start_position(), board);
    }

    #[test]
    fn unlimited_budget_completes_every_depth() {
        let mut board = Board::from_start_position();
        let config = SearchConfig {
            quiescence_depth: 0,
            ..Default::default()
        };
        let result = Searcher::with_config(config).search_with_time_limit(&mut board, Color::Red, 2, None);
        assert_eq!(2, result.depth);
        assert!(result.best_move.is_some());
        assert_eq!(Board::from_start_position(), board);
    }

    #[test]
    fn oversized_budget_never_expires() {
        let mut board = Board::from_start_position();
        let config = SearchConfig {
            quiescence_depth: 0,
            ..Default::default()
        };
        let result = Searcher::with_config(config).search_with_time_limit(
            &mut board,
            Color::Red,
            2,
            Some(Duration::from_secs(u64::max_value())),
        );
        assert_eq!(2, result.depth);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn zero_max_depth_searches_one_ply() {
        let mut board = Board::from_fen("4k4/R8/9/9/9/8R/9/9/9/3K5 r").unwrap();
        let result = searcher().search_with_time_limit(&mut board, Color::Red, 0, None);
        assert_eq!(1, result.depth);
        assert_eq!(Some(mv((5, 8), (0, 8))), result.best_move);
    }

    #[test]
    fn ordering_keeps_generation_order_for_ties() {
        let mut board = Board::from_start_position();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&mut board, Color::Red, &mut moves);
        let quiet: Vec<Move> = moves
            .iter()
            .cloned()
            .filter(|&m| move_score(&mut board, m, Color::Red) == 0)
            .collect();
        order_moves(&mut board, &mut moves, Color::Red);
        assert_eq!(&[mv((7, 1), (0, 1)), mv((7, 7), (0, 7))][..], &moves[..2]);
        assert_eq!(&quiet[..], &moves[2..]);
    }

    #[test]
    fn forced_win_stops_deepening() {
        let mut board = Board::from_fen("4k4/R8/9/9/9/8R/9/9/9/3K5 r").unwrap();
        let result = searcher().search_with_time_limit(&mut board, Color::Red, 4, None);
        assert_eq!(1, result.depth);
        assert_eq!(Score::Win, result.score);
    }
}
