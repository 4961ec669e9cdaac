// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::File;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use xiangqi::eval::PieceSquareEvaluator;
use xiangqi::search::{CsvDataRecorder, DataRecorder, NullDataRecorder, SearchConfig, Searcher};
use xiangqi::{perft, Board, Color, START_FEN};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .default_value(START_FEN)
        .index(1)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("Counts legal move paths from a board position")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to count")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .default_value("3")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Searches a board position for the best move")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("depth")
                        .help("Deepest iteration to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("time")
                        .help("Time budget in milliseconds")
                        .value_name("MILLIS")
                        .short("-t")
                        .long("--time")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("config")
                        .help("JSON file of search parameters")
                        .value_name("FILE")
                        .short("-c")
                        .long("--config")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("stats")
                        .help("CSV file to write per-depth search statistics to")
                        .value_name("FILE")
                        .long("--stats")
                        .takes_value(true),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    if let Some(matches) = matches.subcommand_matches("search") {
        run_search(matches);
    }

    println!("{}", matches.usage());
    process::exit(1);
}

fn parse_position(matches: &ArgMatches) -> (Board, Color) {
    let fen = matches.value_of("FEN").unwrap_or(START_FEN);
    match Board::parse_fen(fen) {
        Ok((board, side)) => (board, side.unwrap_or(Color::Red)),
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let (board, side) = parse_position(matches);

    println!("fen:   {}", board.as_fen_with_side(side));
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&board, side, i);
        let duration = start.elapsed();
        let ms = duration.as_secs() * 1000 + u64::from(duration.subsec_millis());
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_search(matches: &ArgMatches) -> ! {
    let (mut board, side) = parse_position(matches);
    let mut config = match matches.value_of("config") {
        Some(path) => {
            let loaded = File::open(path)
                .map_err(|err| err.to_string())
                .and_then(|file| SearchConfig::from_reader(file).map_err(|err| err.to_string()));
            match loaded {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("failed to load config {}: {}", path, err);
                    process::exit(1);
                }
            }
        }
        None => SearchConfig::default(),
    };

    if matches.is_present("depth") {
        config.max_depth = value_t_or_exit!(matches, "depth", u32);
    }

    if matches.is_present("time") {
        config.time_budget_ms = Some(value_t_or_exit!(matches, "time", u64));
    }

    let recorder: Box<dyn DataRecorder> = match matches.value_of("stats") {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(CsvDataRecorder::new(file)),
            Err(err) => {
                eprintln!("failed to create {}: {}", path, err);
                process::exit(1);
            }
        },
        None => Box::new(NullDataRecorder),
    };

    println!("fen:   {}", board.as_fen_with_side(side));
    println!("depth: {}", config.max_depth);
    println!();
    println!("{}", board);
    println!();

    let searcher: Searcher<PieceSquareEvaluator> = Searcher::new(config);
    let result = searcher.search_with_recorder(&mut board, side, &*recorder);
    match result.best_move {
        Some(mov) => println!("best move: {}", mov),
        None => println!("best move: none"),
    }
    println!("    score: {}", result.score);
    println!("    depth: {}", result.depth);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}
