/*
pathfinder.rs

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

//! Find routes on an open rectangular grid.
//!
//! A route goes from a start cell to an end cell with unit moves up, down, left, or right, and
//! never makes more than three consecutive moves in the same direction.
//!
//! The simplest entry point is [`search::find_path`], which returns a [`path::GridPath`] object.
//! Among the shortest routes, the one returned is chosen at random: the order in which the four
//! moves are tried is shuffled at each step by a [`tie_breaker::TieBreaker`] object.
//! To get reproducible routes, create a [`search::PathFinder`] object with a seed in its
//! [`crate::config::SearchConfig`] configuration.
//! The [`search::PathFinder`] object also reports statistics about its last search.
//!
//! The search is an A* over [`state::StateKey`] states, which combine the cell with the last
//! move and the number of times it was repeated.
//! The building blocks are:
//!
//! * [`grid::GridModel`] for the grid bounds and [`grid::Cell::manhattan`] for the heuristic.
//! * [`frontier::Frontier`], the open set ordered by estimated total cost.
//! * [`ledger::CostLedger`] and [`ledger::BackpointerTable`] for the best known cost and the
//!   predecessor of each state.

pub mod direction;
pub mod frontier;
pub mod grid;
pub mod ledger;
pub mod path;
pub mod search;
pub mod state;
pub mod tie_breaker;

pub use grid::{Cell, GridModel, InvalidInput};
pub use path::GridPath;
pub use search::{PathError, PathFinder, find_path};
