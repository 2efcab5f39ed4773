/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Trailgrid.

Trailgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Trailgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Trailgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! Find a route across the default 15x30 grid, from the top-left to the bottom-right corner:
//!
//! ```text
//! $ trailgrid --format map --seed 4
//! ```
//!
//! Run the same search with 100 seeds and print how many different routes were found, all of
//! the same length:
//!
//! ```text
//! $ trailgrid --rows 8 --cols 8 --start 0,0 --end 7,7 --seed 1 --count 100 --summary
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::env;
use std::error::Error;

use crate::config::{COPYRIGHT_NOTICE, DEFAULT_COLS, DEFAULT_ROWS, MAX_STRAIGHT_RUN, SearchConfig};
use crate::pathfinder::direction::Direction;
use crate::pathfinder::grid::{Cell, GridModel};
use crate::pathfinder::path::GridPath;
use crate::pathfinder::search::{PathError, PathFinder};

/// How the routes are printed.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// List of cells
    #[default]
    Text,
    /// JSON array of cells
    Json,
    /// Drawing of the grid with the route
    Map,
}

/// Find turn-constrained shortest routes on an open grid.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
pub struct Args {
    /// Number of rows in the grid
    #[arg(short, long, default_value_t = DEFAULT_ROWS, allow_negative_numbers = true)]
    rows: i32,

    /// Number of columns in the grid
    #[arg(short = 'C', long, default_value_t = DEFAULT_COLS, allow_negative_numbers = true)]
    cols: i32,

    /// Starting cell, as ROW,COL
    #[arg(short, long, default_value = "0,0", allow_hyphen_values = true)]
    start: Cell,

    /// Destination cell, as ROW,COL [default: the bottom-right corner]
    #[arg(short, long, allow_hyphen_values = true)]
    end: Option<Cell>,

    /// Seed for the random choice among the shortest routes. The nth search uses seed + n
    #[arg(long)]
    seed: Option<u64>,

    /// Give up a search after expanding that many states
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Number of searches to run
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Output format
    #[arg(value_enum, short, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print some statistics after the searches
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Run the searches requested by the arguments.
fn run(args: &Args) -> Result<u8, Box<dyn Error>> {
    // Bad dimensions would fail every search the same way
    let grid: GridModel = GridModel::new(args.rows, args.cols)?;
    let end: Cell = args
        .end
        .unwrap_or_else(|| Cell::new(grid.rows() - 1, grid.cols() - 1));

    let mut finder: PathFinder = PathFinder::new(SearchConfig {
        seed: args.seed,
        max_expansions: args.max_expansions,
    });

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut expansions: usize = 0;
    let mut errors: usize = 0;
    let mut routes: HashSet<Vec<Cell>> = HashSet::new();
    let mut lengths: BTreeSet<usize> = BTreeSet::new();

    for i in 0..args.count {
        debug!("Search {i}");
        finder.config.seed = args.seed.map(|s| s.wrapping_add(i as u64));

        let ret: Result<GridPath, PathError> =
            finder.find(grid.rows(), grid.cols(), args.start, end);
        total += finder.duration;
        max = max.max(finder.duration);
        expansions += finder.expanded;

        match ret {
            Ok(path) => {
                // Verify that the route follows the rules
                if !path.is_contiguous() || path.longest_straight_run() > MAX_STRAIGHT_RUN as usize
                {
                    eprintln!("Invalid route: {:?}", path.cells());
                    panic!("Bug: the route breaks the movement rules");
                }
                lengths.insert(path.len());
                routes.insert(path.cells().to_vec());
                print_path(&path, args.format, &grid)?;
            }

            // Bad arguments: the next searches would fail the same way
            Err(e @ PathError::InvalidInput(_)) => return Err(Box::new(e)),

            Err(e) => {
                errors += 1;
                eprintln!("Error: {e}");
            }
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average expansions = {}
   distinct routes = {}
     route lengths = {:?}
            errors = {}",
            total,
            total / args.count as f32,
            max,
            expansions / args.count,
            routes.len(),
            lengths,
            errors
        );
    }
    Ok(if errors > 0 { 1 } else { 0 })
}

/// Print the route in the requested format.
fn print_path(
    path: &GridPath,
    format: OutputFormat,
    grid: &GridModel,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => println!("{}", render_text(path)),
        OutputFormat::Json => println!("{}", serde_json::to_string(path)?),
        OutputFormat::Map => print!("{}", render_map(path, grid)),
    }
    Ok(())
}

/// Return the cells of the route as `(r,c) -> (r,c) -> ...`.
pub fn render_text(path: &GridPath) -> String {
    path.cells()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(" -> ")
}

/// Draw the grid with the route.
///
/// `S` and `E` mark the ends of the route, the other route cells show the direction in which
/// the route leaves them (the last time, for cells the route crosses twice), and the rest of
/// the grid is drawn with `.`.
pub fn render_map(path: &GridPath, grid: &GridModel) -> String {
    let mut exits: HashMap<Cell, Direction> = HashMap::new();
    for w in path.cells().windows(2) {
        if let Some(d) = Direction::between(w[0], w[1]) {
            exits.insert(w[0], d);
        }
    }

    let mut s: String = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell: Cell = Cell::new(row, col);
            let c: char = if path.first() == Some(cell) {
                'S'
            } else if path.last() == Some(cell) {
                'E'
            } else if let Some(d) = exits.get(&cell) {
                d.symbol()
            } else {
                '.'
            };
            s.push(c);
        }
        s.push('\n');
    }
    s
}
