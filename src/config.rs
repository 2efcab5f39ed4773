/*
config.rs

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

//! Constants and run-time settings.

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Maximum number of consecutive moves in the same direction.
pub const MAX_STRAIGHT_RUN: u8 = 3;

/// Path reconstruction gives up after `RECONSTRUCTION_GUARD_FACTOR * rows * cols` steps.
/// A valid route never visits a (cell, run, direction) state twice, so a longer chain can only
/// come from corrupted predecessor links.
pub const RECONSTRUCTION_GUARD_FACTOR: usize = 4;

/// Grid size used by the command line when none is given.
pub const DEFAULT_ROWS: i32 = 15;
pub const DEFAULT_COLS: i32 = 30;

/// Settings for a search.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SearchConfig {
    /// Seed for the direction shuffling. Searches with the same seed and the same input return
    /// the same route. Without a seed, every search is seeded differently.
    pub seed: Option<u64>,

    /// Give up after expanding that many states.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Configuration with a fixed seed and no expansion limit.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            max_expansions: None,
        }
    }
}
