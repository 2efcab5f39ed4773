/*
lib.rs

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

pub mod cli_options;
pub mod config;
pub mod pathfinder;

pub use config::SearchConfig;
pub use pathfinder::{Cell, GridPath, PathError, PathFinder, find_path};
