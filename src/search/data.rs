// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use crate::board::Board;
use crate::types::Color;

/// Statistics for one completed iteration of a search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub depth: u32,
    pub best_move: String,
    pub score: String,
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub cutoffs: u64,
    pub elapsed_ms: u64,
}

pub trait DataRecorder {
    fn record(&self, board: &Board, side: Color, rec: &Record);
}

pub struct NullDataRecorder;
impl DataRecorder for NullDataRecorder {
    fn record(&self, _board: &Board, _side: Color, _rec: &Record) {}
}

pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }

    pub fn into_inner(self) -> Option<W> {
        let writer = match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        writer.into_inner().ok()
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, board: &Board, side: Color, rec: &Record) {
        let mut copy = rec.clone();
        copy.fen = board.as_fen_with_side(side);
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(err) = writer.serialize(&copy) {
            warn!("failed to write search record: {}", err);
            return;
        }

        if let Err(err) = writer.flush() {
            warn!("failed to flush search records: {}", err);
        }
    }
}
