/*
tie_breaker.rs

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

//! Random order in which the moves are tried.
//!
//! Shuffling changes which of the equally short routes the search discovers first, never which
//! moves are legal or what they cost. All four directions are shuffled at every expansion, even
//! the ones that lead away from the goal: this sometimes costs a few extra expansions but gives
//! more varied routes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::direction::Direction;

/// Source of the per-expansion direction order.
pub struct TieBreaker<R: Rng> {
    rng: R,
}

impl TieBreaker<StdRng> {
    /// Create a [`TieBreaker`] object.
    ///
    /// With a seed, the sequence of orders is reproducible. Without one, the generator is seeded
    /// from the thread generator.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng: StdRng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl<R: Rng> TieBreaker<R> {
    /// Create a [`TieBreaker`] object that draws from the given random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Return the four directions in a uniformly random order.
    pub fn directions(&mut self) -> [Direction; 4] {
        let mut directions: [Direction; 4] = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }
}
