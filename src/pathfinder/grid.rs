/*
grid.rs

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

//! Cells and the rectangular grid they live in.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// A grid cell, identified by its 0-indexed row and column.
///
/// Coordinates are signed so that callers can express (and get rejected for) cells above or
/// to the left of the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a [`Cell`] object.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between the two cells.
    ///
    /// This is the heuristic of the search. With unit-cost moves in four directions it never
    /// overestimates the remaining cost, and the turn constraint can only add moves to a route.
    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Parse a `ROW,COL` string, as given on the command line.
impl FromStr for Cell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim_matches(|c| c == '(' || c == ')')
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
        let row: i32 = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row '{row}': {e}"))?;
        let col: i32 = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column '{col}': {e}"))?;
        Ok(Self { row, col })
    }
}

/// Reasons for rejecting a search request before any search work is done.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InvalidInput {
    /// The number of rows is zero or negative.
    NonPositiveRows(i32),

    /// The number of columns is zero or negative.
    NonPositiveColumns(i32),

    /// The starting cell is outside the grid.
    StartOutOfBounds(Cell),

    /// The destination cell is outside the grid.
    EndOutOfBounds(Cell),
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidInput::NonPositiveRows(r) => write!(f, "row count must be positive, got {r}"),
            InvalidInput::NonPositiveColumns(c) => {
                write!(f, "column count must be positive, got {c}")
            }
            InvalidInput::StartOutOfBounds(c) => write!(f, "start cell {c} is outside the grid"),
            InvalidInput::EndOutOfBounds(c) => write!(f, "end cell {c} is outside the grid"),
        }
    }
}

impl Error for InvalidInput {}

/// Immutable description of the search space.
///
/// The grid is fully open: every in-bounds cell can be traversed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: i32,
    cols: i32,
}

impl GridModel {
    /// Create a [`GridModel`] object.
    ///
    /// # Errors
    ///
    /// Both dimensions must be strictly positive.
    pub fn new(rows: i32, cols: i32) -> Result<Self, InvalidInput> {
        if rows <= 0 {
            return Err(InvalidInput::NonPositiveRows(rows));
        }
        if cols <= 0 {
            return Err(InvalidInput::NonPositiveColumns(cols));
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether the cell is inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.rows).contains(&cell.row) && (0..self.cols).contains(&cell.col)
    }
}
