/*
state.rs

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

//! Search states.
//!
//! Because of the turn constraint, the cell alone is not enough to identify a search node: two
//! arrivals at the same cell with different movement histories can lead to different futures.
//! A [`StateKey`] therefore also records how many moves in a row were made in the last
//! direction.

use std::fmt;

use super::direction::Direction;
use super::grid::{Cell, GridModel};
use crate::config::MAX_STRAIGHT_RUN;

/// Identity of a search node, usable directly as a hash map key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Current cell.
    pub cell: Cell,

    /// Number of consecutive moves in [`StateKey::last`] that produced this state.
    /// Zero only for the starting state.
    pub run: u8,

    /// Direction of the move that produced this state, [`None`] for the starting state.
    pub last: Option<Direction>,
}

/// A search node. Its identity is its whole content.
pub type SearchState = StateKey;

impl StateKey {
    /// Starting state: no move has been made yet.
    pub fn start(cell: Cell) -> Self {
        Self {
            cell,
            run: 0,
            last: None,
        }
    }

    /// Whether this is the starting state of a search.
    pub fn is_start(&self) -> bool {
        self.last.is_none()
    }

    /// State reached by moving in the given direction.
    ///
    /// Return [`None`] if the move would be a fourth consecutive move in the same direction, or
    /// if it leaves the grid.
    pub fn successor(&self, direction: Direction, grid: &GridModel) -> Option<StateKey> {
        let straight: bool = self.last == Some(direction);
        if straight && self.run >= MAX_STRAIGHT_RUN {
            return None;
        }
        let cell: Cell = direction.step_from(self.cell, grid)?;
        Some(StateKey {
            cell,
            run: if straight { self.run + 1 } else { 1 },
            last: Some(direction),
        })
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.last {
            Some(d) => write!(f, "{} {}x{}", self.cell, d, self.run),
            None => write!(f, "{} start", self.cell),
        }
    }
}
