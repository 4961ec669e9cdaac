// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::time::Duration;

use crate::board::Board;
use crate::moves::Move;
use crate::types::Color;

mod config;
mod data;
mod searcher;

pub use config::SearchConfig;
pub use data::{CsvDataRecorder, DataRecorder, NullDataRecorder, Record};
pub use searcher::{move_score, order_moves, SearchResult, Searcher};

/// Returns the best move for `color` found by a fixed-depth search with the default evaluator, or
/// `None` if `color` has no legal moves.
pub fn find_best_move(board: &mut Board, color: Color, depth: u32) -> Option<Move> {
    Searcher::with_config(SearchConfig::default())
        .search_depth(board, color, depth)
        .best_move
}

/// Iteratively deepens from depth 1 to `max_depth` until `time_limit` runs out, returning the
/// best move of the deepest depth that completed. Returns `None` if not even depth 1 completed.
pub fn best_move_with_time_limit(
    board: &mut Board,
    color: Color,
    max_depth: u32,
    time_limit: Duration,
) -> Option<Move> {
    Searcher::with_config(SearchConfig::default())
        .search_with_time_limit(board, color, max_depth, Some(time_limit))
        .best_move
}
