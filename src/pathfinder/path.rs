/*
path.rs

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

//! Route returned by the path finder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::direction::Direction;
use super::grid::Cell;

/// Route as an ordered list of cells, from the start to the end, both included.
///
/// The object is serialized as a plain list of cells.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct GridPath {
    /// Cells in route order.
    cells: Vec<Cell>,

    /// Cells of the route, to answer [`GridPath::contains`] without scanning
    /// [`GridPath::cells`].
    visited: HashSet<Cell>,
}

impl PartialEq for GridPath {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl From<Vec<Cell>> for GridPath {
    fn from(cells: Vec<Cell>) -> Self {
        let visited: HashSet<Cell> = cells.iter().copied().collect();
        Self { cells, visited }
    }
}

impl From<GridPath> for Vec<Cell> {
    fn from(path: GridPath) -> Self {
        path.cells
    }
}

impl GridPath {
    /// Return a reference to the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the route.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves in the route, which is also its cost.
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Whether the cell is on the route.
    pub fn contains(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// Return the first cell of the route.
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Return the last cell of the route.
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Whether every cell is one unit move away from the previous one.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|w| Direction::between(w[0], w[1]).is_some())
    }

    /// Direction of each move.
    ///
    /// The result is shorter than [`GridPath::moves`] if the route is not contiguous.
    pub fn directions(&self) -> Vec<Direction> {
        self.cells
            .windows(2)
            .filter_map(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Largest number of consecutive moves in the same direction.
    pub fn longest_straight_run(&self) -> usize {
        let mut longest: usize = 0;
        let mut run: usize = 0;
        let mut previous: Option<Direction> = None;

        for d in self.directions() {
            run = if previous == Some(d) { run + 1 } else { 1 };
            longest = longest.max(run);
            previous = Some(d);
        }
        longest
    }
}
