/*
search.rs

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

//! A* search with the turn constraint.
//!
//! The search runs over [`StateKey`] states instead of cells. The Manhattan heuristic is
//! consistent for unit moves, so the first time the end cell comes out of the frontier its
//! route is a shortest one. The direction shuffling only changes the insertion order of
//! neighbors with the same cost, never the costs themselves, so any seed returns a route of the
//! same (optimal) length.

use log::{debug, error, trace, warn};
use rand::Rng;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::frontier::{Frontier, PriorityEntry};
use super::grid::{Cell, GridModel, InvalidInput};
use super::ledger::{BackpointerTable, BrokenChain, CostLedger};
use super::path::GridPath;
use super::state::StateKey;
use super::tie_breaker::TieBreaker;
use crate::config::{RECONSTRUCTION_GUARD_FACTOR, SearchConfig};

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// Bad grid dimensions or endpoints. Nothing was searched.
    InvalidInput(InvalidInput),

    /// The frontier was exhausted without reaching the end cell. On an open grid a route always
    /// exists, because a straight run can be broken by stepping aside or back.
    NoPathFound,

    /// The search is broken, for example the predecessor chain loops.
    InternalInvariantViolation(String),

    /// The expansion limit from [`SearchConfig::max_expansions`] was reached.
    ExpansionLimitExceeded { expanded: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathError::InvalidInput(e) => write!(f, "invalid input: {e}"),
            PathError::NoPathFound => write!(f, "no path found"),
            PathError::InternalInvariantViolation(msg) => {
                write!(f, "internal invariant violation: {msg}")
            }
            PathError::ExpansionLimitExceeded { expanded } => {
                write!(f, "gave up after expanding {expanded} states")
            }
        }
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PathError::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidInput> for PathError {
    fn from(e: InvalidInput) -> Self {
        PathError::InvalidInput(e)
    }
}

/// Check the dimensions and the endpoints, and return the grid.
pub fn validate(rows: i32, cols: i32, start: Cell, end: Cell) -> Result<GridModel, InvalidInput> {
    let grid: GridModel = GridModel::new(rows, cols)?;
    if !grid.contains(start) {
        return Err(InvalidInput::StartOutOfBounds(start));
    }
    if !grid.contains(end) {
        return Err(InvalidInput::EndOutOfBounds(end));
    }
    Ok(grid)
}

/// Find a shortest route from `start` to `end`, with no more than three consecutive moves in
/// the same direction.
///
/// Every call shuffles the moves differently, so two calls can return two different routes of
/// the same length. Use [`PathFinder`] with a seed to get reproducible routes.
///
/// # Errors
///
/// See [`PathError`]. No partial route is ever returned.
pub fn find_path(rows: i32, cols: i32, start: Cell, end: Cell) -> Result<GridPath, PathError> {
    PathFinder::new(SearchConfig::default()).find(rows, cols, start, end)
}

/// [`PathFinder`] object.
///
/// The object holds the settings and the statistics of the last search. The working structures
/// (frontier, cost ledger, predecessors) are created for each search, so separate
/// [`PathFinder`] objects can run on separate threads.
#[derive(Debug)]
pub struct PathFinder {
    /// Search settings.
    pub config: SearchConfig,

    /// Number of states expanded during the last search.
    pub expanded: usize,

    /// Number of entries pushed into the frontier during the last search.
    pub pushed: usize,

    /// Number of superseded frontier entries skipped during the last search.
    pub stale: usize,

    /// Duration in seconds of the last search.
    pub duration: f32,

    /// Time when the search started. Used to compute the [`PathFinder::duration`].
    start: Instant,
}

impl PathFinder {
    /// Create the object.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            expanded: 0,
            pushed: 0,
            stale: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Find a route, shuffling the moves with the configured seed.
    ///
    /// # Errors
    ///
    /// See [`PathError`].
    pub fn find(
        &mut self,
        rows: i32,
        cols: i32,
        start: Cell,
        end: Cell,
    ) -> Result<GridPath, PathError> {
        let mut tie_breaker = TieBreaker::from_seed(self.config.seed);
        self.run(rows, cols, start, end, &mut tie_breaker)
    }

    /// Find a route, shuffling the moves with the given random source. The configured seed is
    /// ignored.
    ///
    /// # Errors
    ///
    /// See [`PathError`].
    pub fn find_with_rng<R: Rng>(
        &mut self,
        rows: i32,
        cols: i32,
        start: Cell,
        end: Cell,
        rng: R,
    ) -> Result<GridPath, PathError> {
        let mut tie_breaker = TieBreaker::new(rng);
        self.run(rows, cols, start, end, &mut tie_breaker)
    }

    fn run<R: Rng>(
        &mut self,
        rows: i32,
        cols: i32,
        start: Cell,
        end: Cell,
        tie_breaker: &mut TieBreaker<R>,
    ) -> Result<GridPath, PathError> {
        self.expanded = 0;
        self.pushed = 0;
        self.stale = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let grid: GridModel = validate(rows, cols, start, end)?;
        debug!(
            "Grid = {rows}x{cols}  Start = {start}  End = {end}  Seed = {:?}",
            self.config.seed
        );

        let res: Result<GridPath, PathError> = self.search(&grid, start, end, tie_breaker);
        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Expanded = {}  Pushed = {}  Stale = {}  Duration = {}",
            self.expanded, self.pushed, self.stale, self.duration
        );
        res
    }

    /// A* main loop.
    fn search<R: Rng>(
        &mut self,
        grid: &GridModel,
        start: Cell,
        end: Cell,
        tie_breaker: &mut TieBreaker<R>,
    ) -> Result<GridPath, PathError> {
        let mut frontier: Frontier = Frontier::new();
        let mut ledger: CostLedger = CostLedger::new();
        let mut backpointers: BackpointerTable = BackpointerTable::new();

        let start_state: StateKey = StateKey::start(start);
        ledger.improve(start_state, 0);
        frontier.push(start.manhattan(&end), 0, start_state);
        self.pushed += 1;

        while let Some(entry) = frontier.pop() {
            let current: StateKey = entry.state;

            if current.cell == end {
                return self.reconstruct(grid, &backpointers, current);
            }

            let g_cost: u32 = self.current_cost(&ledger, &entry)?;
            if entry.g_cost > g_cost {
                // A cheaper route to this state was found after the entry was pushed, and that
                // route has already been expanded.
                self.stale += 1;
                continue;
            }

            if let Some(max) = self.config.max_expansions
                && self.expanded >= max
            {
                warn!("Giving up after expanding {} states", self.expanded);
                return Err(PathError::ExpansionLimitExceeded {
                    expanded: self.expanded,
                });
            }
            self.expanded += 1;
            trace!("Expanding {current}  g = {g_cost}  f = {}", entry.f_cost);

            for direction in tie_breaker.directions() {
                let Some(next) = current.successor(direction, grid) else {
                    continue;
                };
                let tentative: u32 = g_cost + 1;
                if ledger.improve(next, tentative) {
                    backpointers.set(next, current);
                    frontier.push(tentative + next.cell.manhattan(&end), tentative, next);
                    self.pushed += 1;
                }
            }
        }

        warn!(
            "No path from {start} to {end} after expanding {} states",
            self.expanded
        );
        Err(PathError::NoPathFound)
    }

    /// Return the ledger cost of the popped state.
    fn current_cost(&self, ledger: &CostLedger, entry: &PriorityEntry) -> Result<u32, PathError> {
        match ledger.get(&entry.state) {
            Some(g) => Ok(g),
            None => {
                error!("State {} is in the frontier but not in the ledger", entry.state);
                Err(PathError::InternalInvariantViolation(format!(
                    "state {} has no recorded cost",
                    entry.state
                )))
            }
        }
    }

    /// Build the route that ends with the given state.
    fn reconstruct(
        &self,
        grid: &GridModel,
        backpointers: &BackpointerTable,
        goal: StateKey,
    ) -> Result<GridPath, PathError> {
        let max_steps: usize = grid
            .cell_count()
            .saturating_mul(RECONSTRUCTION_GUARD_FACTOR);
        match backpointers.trace(goal, max_steps) {
            Ok(cells) => {
                debug!("Found a path of {} cells", cells.len());
                Ok(GridPath::from(cells))
            }
            Err(BrokenChain::TooLong(steps)) => {
                error!("Path reconstruction from {goal} did not end after {steps} steps");
                Err(PathError::InternalInvariantViolation(format!(
                    "predecessor chain from {goal} longer than {max_steps} steps"
                )))
            }
            Err(BrokenChain::Dangling(state)) => {
                error!("Path reconstruction from {goal} stopped at {state}");
                Err(PathError::InternalInvariantViolation(format!(
                    "state {state} has no predecessor but is not the start"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinder::direction::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, Cell::new(0, 0), Cell::new(0, 0), InvalidInput::NonPositiveRows(0))]
    #[case(5, -2, Cell::new(0, 0), Cell::new(0, 0), InvalidInput::NonPositiveColumns(-2))]
    #[case(3, 3, Cell::new(3, 0), Cell::new(0, 0), InvalidInput::StartOutOfBounds(Cell::new(3, 0)))]
    #[case(3, 3, Cell::new(0, 0), Cell::new(0, -1), InvalidInput::EndOutOfBounds(Cell::new(0, -1)))]
    fn invalid_input_is_rejected_before_searching(
        #[case] rows: i32,
        #[case] cols: i32,
        #[case] start: Cell,
        #[case] end: Cell,
        #[case] expected: InvalidInput,
    ) {
        let mut finder = PathFinder::new(SearchConfig::seeded(0));
        assert_eq!(
            finder.find(rows, cols, start, end),
            Err(PathError::InvalidInput(expected))
        );
        assert_eq!(finder.expanded, 0);
        assert_eq!(finder.pushed, 0);
    }

    #[test]
    fn start_equals_end() {
        let mut finder = PathFinder::new(SearchConfig::seeded(3));
        let path = finder.find(3, 3, Cell::new(1, 1), Cell::new(1, 1)).unwrap();
        assert_eq!(path.cells(), &[Cell::new(1, 1)]);
        assert_eq!(finder.expanded, 0);
    }

    #[test]
    fn single_row_detours_by_stepping_back() {
        let mut finder = PathFinder::new(SearchConfig::seeded(11));
        let path = finder.find(1, 5, Cell::new(0, 0), Cell::new(0, 4)).unwrap();
        // Four moves to the right in a row are not allowed: one step back costs two moves
        assert_eq!(path.moves(), 6);
        assert_eq!(path.first(), Some(Cell::new(0, 0)));
        assert_eq!(path.last(), Some(Cell::new(0, 4)));
        assert!(path.longest_straight_run() <= 3);
        assert!(path.directions().contains(&Direction::Left));
    }

    #[test]
    fn single_row_of_three_moves_is_fine() {
        let path = find_path(1, 4, Cell::new(0, 0), Cell::new(0, 3)).unwrap();
        assert_eq!(path.moves(), 3);
    }

    #[test]
    fn exhausted_frontier_reports_no_path() {
        // An end cell outside the grid can never be popped, so the search runs out of states
        let grid = GridModel::new(2, 2).unwrap();
        let mut finder = PathFinder::new(SearchConfig::seeded(4));
        let mut tie_breaker = TieBreaker::from_seed(Some(4));
        assert_eq!(
            finder.search(&grid, Cell::new(0, 0), Cell::new(5, 5), &mut tie_breaker),
            Err(PathError::NoPathFound)
        );
        assert!(finder.expanded > grid.cell_count());
    }

    #[test]
    fn corrupted_backpointers_are_an_invariant_violation() {
        let grid = GridModel::new(2, 2).unwrap();
        let a = StateKey::start(Cell::new(0, 0))
            .successor(Direction::Right, &grid)
            .unwrap();
        let b = a.successor(Direction::Left, &grid).unwrap();
        let mut backpointers = BackpointerTable::new();
        backpointers.set(a, b);
        backpointers.set(b, a);

        let finder = PathFinder::new(SearchConfig::default());
        let res = finder.reconstruct(&grid, &backpointers, a);
        assert!(matches!(res, Err(PathError::InternalInvariantViolation(_))));
        assert_ne!(res, Err(PathError::NoPathFound));
    }

    #[test]
    fn dangling_backpointers_are_an_invariant_violation() {
        let grid = GridModel::new(3, 3).unwrap();
        let a = StateKey::start(Cell::new(1, 1))
            .successor(Direction::Down, &grid)
            .unwrap();
        let b = a.successor(Direction::Right, &grid).unwrap();
        let mut backpointers = BackpointerTable::new();
        backpointers.set(b, a);

        let finder = PathFinder::new(SearchConfig::default());
        assert!(matches!(
            finder.reconstruct(&grid, &backpointers, b),
            Err(PathError::InternalInvariantViolation(_))
        ));
    }

    #[rstest]
    #[case(1_000_000, 1_000_000)]
    #[case(20_000, 20_000)]
    #[case(i32::MAX, i32::MAX)]
    fn neighbors_on_a_huge_grid(#[case] rows: i32, #[case] cols: i32) {
        let mut finder = PathFinder::new(SearchConfig::seeded(2));
        let path = finder.find(rows, cols, Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        assert_eq!(path.cells(), &[Cell::new(0, 0), Cell::new(0, 1)]);
        assert_eq!(finder.expanded, 1);

        let far = Cell::new(rows - 1, cols - 1);
        let near = Cell::new(rows - 3, cols - 2);
        let path = finder.find(rows, cols, far, near).unwrap();
        assert_eq!(path.moves(), 3);
    }

    #[test]
    fn expansion_limit_is_distinct_from_no_path() {
        let mut finder = PathFinder::new(SearchConfig {
            seed: Some(5),
            max_expansions: Some(3),
        });
        assert_eq!(
            finder.find(15, 30, Cell::new(0, 0), Cell::new(14, 29)),
            Err(PathError::ExpansionLimitExceeded { expanded: 3 })
        );
    }

    #[test]
    fn statistics_are_reset_between_runs() {
        let mut finder = PathFinder::new(SearchConfig::seeded(9));
        finder
            .find(15, 30, Cell::new(0, 0), Cell::new(14, 29))
            .unwrap();
        assert!(finder.expanded >= 43);
        assert!(finder.pushed > finder.expanded);

        finder.find(3, 3, Cell::new(2, 2), Cell::new(2, 2)).unwrap();
        assert_eq!(finder.expanded, 0);
        assert_eq!(finder.pushed, 1);
        assert_eq!(finder.stale, 0);
    }

    #[test]
    fn caller_supplied_rng_matches_seed() {
        let mut a = PathFinder::new(SearchConfig::seeded(77));
        let mut b = PathFinder::new(SearchConfig::default());
        let pa = a.find(8, 8, Cell::new(0, 7), Cell::new(7, 0)).unwrap();
        let pb = b
            .find_with_rng(8, 8, Cell::new(0, 7), Cell::new(7, 0), StdRng::seed_from_u64(77))
            .unwrap();
        assert_eq!(pa, pb);
    }

    #[test]
    fn errors_display() {
        let e = PathError::from(InvalidInput::NonPositiveRows(0));
        assert_eq!(e.to_string(), "invalid input: row count must be positive, got 0");
        assert!(e.source().is_some());
        assert_eq!(PathError::NoPathFound.to_string(), "no path found");
        assert!(PathError::NoPathFound.source().is_none());
    }
}
