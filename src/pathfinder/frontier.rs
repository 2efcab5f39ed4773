/*
frontier.rs

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

//! Open set of the search, ordered by estimated total cost.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::state::SearchState;

/// Entry in the [`Frontier`].
///
/// Several entries for the same state can be in the frontier at the same time. The ones that
/// were superseded by a cheaper route are detected against the cost ledger when popped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PriorityEntry {
    /// Estimated total cost: `g + h`.
    pub f_cost: u32,

    /// Cost from the start when the entry was pushed.
    pub g_cost: u32,

    /// Insertion number, to keep the order total.
    seq: u64,

    pub state: SearchState,
}

// BinaryHeap is a max-heap: flip the cost comparisons so that the smallest f-cost comes out
// first. Among equal f-costs, the entry closest to the goal (largest g) wins, then the oldest.
impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| self.g_cost.cmp(&other.g_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of [`PriorityEntry`] objects.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<PriorityEntry>,
    next_seq: u64,
}

impl Frontier {
    /// Create an empty [`Frontier`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state with its costs.
    pub fn push(&mut self, f_cost: u32, g_cost: u32, state: SearchState) {
        self.heap.push(PriorityEntry {
            f_cost,
            g_cost,
            seq: self.next_seq,
            state,
        });
        self.next_seq += 1;
    }

    /// Remove and return the entry with the smallest f-cost.
    pub fn pop(&mut self) -> Option<PriorityEntry> {
        self.heap.pop()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
