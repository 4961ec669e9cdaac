// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Read;
use std::time::Duration;

/// Tunable parameters of a search. Every field has a default, so a JSON document only needs to
/// name the fields it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest iteration the search will attempt.
    pub max_depth: u32,

    /// Wall-clock budget for an iterative deepening search, in milliseconds. No budget means every
    /// depth up to `max_depth` runs to completion.
    pub time_budget_ms: Option<u64>,

    /// Plies of capture-only search past the horizon. Zero disables quiescence.
    pub quiescence_depth: u32,

    /// Whether to search captures and checks before quiet moves.
    pub move_ordering: bool,

    /// Whether a side with no legal moves that is not in check has lost, as Xiangqi rules have
    /// it. When false, stalemate scores as a draw.
    pub stalemate_is_loss: bool,
}

impl SearchConfig {
    pub fn from_json(json: &str) -> serde_json::Result<SearchConfig> {
        serde_json::from_str(json)
    }

    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<SearchConfig> {
        serde_json::from_reader(reader)
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            max_depth: 3,
            time_budget_ms: None,
            quiescence_depth: 4,
            move_ordering: true,
            stalemate_is_loss: true,
        }
    }
}
