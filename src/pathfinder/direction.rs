/*
direction.rs

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

//! The four compass moves.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::grid::{Cell, GridModel};

/// Unit move on the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All the directions, in the order the search lists them before shuffling.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Row and column offsets of the move.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    /// Character used when drawing the move.
    pub const fn symbol(self) -> char {
        match self {
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Up => '^',
        }
    }

    /// Cell reached by moving from `cell` in this direction, or [`None`] if that cell is outside
    /// the grid.
    pub fn step_from(self, cell: Cell, grid: &GridModel) -> Option<Cell> {
        let (dr, dc) = self.delta();
        let next = Cell::new(cell.row.checked_add(dr)?, cell.col.checked_add(dc)?);
        if grid.contains(next) { Some(next) } else { None }
    }

    /// Direction of the unit move from `from` to `to`, if the two cells are adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let delta = (to.row.checked_sub(from.row)?, to.col.checked_sub(from.col)?);
        Direction::ALL.into_iter().find(|d| d.delta() == delta)
    }
}
