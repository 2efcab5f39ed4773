/*
ledger.rs

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

//! Best known costs and predecessors of the search states.

use log::trace;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::grid::Cell;
use super::state::StateKey;

/// Best known cost from the start (g-cost) for each state.
///
/// Used instead of a closed set: a state is worth exploring again only if it is reached for
/// less than what the ledger already holds.
#[derive(Debug, Default)]
pub struct CostLedger {
    costs: HashMap<StateKey, u32>,
}

impl CostLedger {
    /// Create an empty [`CostLedger`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Best known cost for the state.
    pub fn get(&self, key: &StateKey) -> Option<u32> {
        self.costs.get(key).copied()
    }

    /// Record the cost if it is strictly lower than the known one (or if the state is new).
    ///
    /// Return whether the cost was recorded.
    pub fn improve(&mut self, key: StateKey, cost: u32) -> bool {
        match self.costs.entry(key) {
            Entry::Occupied(mut e) => {
                if cost < *e.get() {
                    e.insert(cost);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(e) => {
                e.insert(cost);
                true
            }
        }
    }

    /// Number of states with a known cost.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Predecessor of each state on its cheapest known route.
#[derive(Debug, Default)]
pub struct BackpointerTable {
    parents: HashMap<StateKey, StateKey>,
}

impl BackpointerTable {
    /// Create an empty [`BackpointerTable`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the predecessor of the state.
    pub fn set(&mut self, key: StateKey, parent: StateKey) {
        self.parents.insert(key, parent);
    }

    /// Predecessor of the state, [`None`] for the starting state.
    pub fn get(&self, key: &StateKey) -> Option<&StateKey> {
        self.parents.get(key)
    }

    /// Follow the predecessors from `goal` back to the starting state, and return the visited
    /// cells in start-to-goal order.
    ///
    /// # Errors
    ///
    /// Return [`BrokenChain`] if the table is corrupted.
    pub fn trace(&self, goal: StateKey, max_steps: usize) -> Result<Vec<Cell>, BrokenChain> {
        let mut cells: Vec<Cell> = Vec::new();
        let mut current: StateKey = goal;

        loop {
            cells.push(current.cell);
            if cells.len() > max_steps {
                return Err(BrokenChain::TooLong(cells.len()));
            }
            match self.parents.get(&current) {
                Some(parent) => current = *parent,
                None if current.is_start() => break,
                None => return Err(BrokenChain::Dangling(current)),
            }
        }
        trace!("Traced {} cells back from {goal}", cells.len());
        cells.reverse();
        Ok(cells)
    }
}

/// Corrupted predecessor chain found by [`BackpointerTable::trace`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BrokenChain {
    /// The chain did not end within the step limit. Holds the number of steps taken.
    TooLong(usize),

    /// A state other than the start has no predecessor.
    Dangling(StateKey),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinder::direction::Direction;
    use crate::pathfinder::grid::GridModel;

    #[test]
    fn ledger_keeps_minimum() {
        let key = StateKey::start(Cell::new(0, 0));
        let mut ledger = CostLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.get(&key), None);

        assert!(ledger.improve(key, 5));
        assert!(!ledger.improve(key, 5));
        assert!(!ledger.improve(key, 8));
        assert_eq!(ledger.get(&key), Some(5));
        assert!(ledger.improve(key, 2));
        assert_eq!(ledger.get(&key), Some(2));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn trace_follows_chain_back_to_start() {
        let grid = GridModel::new(3, 3).unwrap();
        let start = StateKey::start(Cell::new(0, 0));
        let a = start.successor(Direction::Right, &grid).unwrap();
        let b = a.successor(Direction::Down, &grid).unwrap();

        let mut table = BackpointerTable::new();
        table.set(a, start);
        table.set(b, a);
        assert_eq!(table.get(&start), None);
        assert_eq!(table.get(&b), Some(&a));

        assert_eq!(
            table.trace(b, 36),
            Ok(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)])
        );
        assert_eq!(table.trace(start, 36), Ok(vec![Cell::new(0, 0)]));
    }

    #[test]
    fn trace_reports_cycles() {
        let grid = GridModel::new(3, 3).unwrap();
        let a = StateKey::start(Cell::new(1, 1))
            .successor(Direction::Up, &grid)
            .unwrap();
        let b = a.successor(Direction::Down, &grid).unwrap();

        let mut table = BackpointerTable::new();
        table.set(a, b);
        table.set(b, a);
        assert_eq!(table.trace(a, 36), Err(BrokenChain::TooLong(37)));
    }

    #[test]
    fn trace_reports_missing_links() {
        let grid = GridModel::new(3, 3).unwrap();
        let start = StateKey::start(Cell::new(0, 0));
        let a = start.successor(Direction::Down, &grid).unwrap();
        let b = a.successor(Direction::Down, &grid).unwrap();
        let c = b.successor(Direction::Right, &grid).unwrap();

        // The link from `a` back to the start is missing
        let mut table = BackpointerTable::new();
        table.set(c, b);
        table.set(b, a);
        assert_eq!(table.trace(c, 36), Err(BrokenChain::Dangling(a)));

        table.set(a, start);
        assert_eq!(table.trace(c, 36).map(|cells| cells.len()), Ok(4));
    }
}
