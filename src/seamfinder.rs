// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Finding the cheapest vertical seam
//!
//! Two passes over an energy map.  The first builds the cumulative
//! energy map: for every pixel, the cost of the cheapest 3-connected
//! path from the top row down to it.  The second starts from the
//! cheapest pixel in the bottom row and walks back up, at each step
//! choosing the cheapest of the three pixels above.
//!
//! Both passes break ties the same way, towards the leftmost column,
//! and both treat columns off either edge as absent rather than
//! wrapping around.  The whole table is kept because the walk back up
//! reads every row of it.

use crate::cq;
use crate::pixmap::{GreyImage, Image};
use tracing::trace;

/// Minimum path cost from the top row to each pixel.  Not clamped.
pub type CumulativeMap = Image<u32>;

/// One flat pixel index per row, top to bottom, into the image the
/// seam was found in.  Consecutive rows differ by at most one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<usize>);

impl Seam {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The seam as column numbers, given the width it was found at.
    pub fn columns(&self, width: usize) -> Vec<usize> {
        self.0.iter().map(|i| i % width).collect()
    }
}

impl From<Vec<usize>> for Seam {
    fn from(indices: Vec<usize>) -> Self {
        Seam(indices)
    }
}

// Of the (up to) three pixels above `col`, the column of the cheapest.
// `min_by_key` keeps the first of equal minima, which is the leftmost.
#[inline]
fn cheapest_parent(above: &[u32], col: usize) -> usize {
    let last = above.len() - 1;
    (cq!(col == 0, 0, col - 1)..=cq!(col == last, last, col + 1))
        .min_by_key(|c| above[*c])
        .unwrap_or(col)
}

/// Build the cumulative energy map of `energy`.  Row 0 is copied
/// through; every later pixel adds its energy to its cheapest parent.
pub fn cumulative_energy_map(energy: &GreyImage) -> CumulativeMap {
    let (width, height) = energy.dimensions();
    let mut cem: Vec<u32> = Vec::with_capacity(width * height);
    cem.extend(energy.row(0).iter().map(|e| u32::from(*e)));

    for row in 1..height {
        let above = (row - 1) * width;
        for (col, e) in energy.row(row).iter().enumerate() {
            let parent = cheapest_parent(&cem[above..above + width], col);
            let cost = u32::from(*e) + cem[above + parent];
            cem.push(cost);
        }
    }
    Image::from_raw_parts(width, height, cem)
}

/// Walk the cumulative energy map back up from its cheapest bottom
/// pixel, yielding the minimum-energy seam.
pub fn minimum_energy_seam(cem: &CumulativeMap) -> Seam {
    let (width, height) = cem.dimensions();
    let bottom = cem.row(height - 1);
    let mut col = (0..width).min_by_key(|c| bottom[*c]).unwrap_or(0);
    trace!(col, cost = bottom[col], "cheapest seam end");

    // Collected bottom-up, then flipped once.
    let mut seam = Vec::with_capacity(height);
    seam.push(cem.index_of(height - 1, col));
    for row in (0..height - 1).rev() {
        col = cheapest_parent(cem.row(row), col);
        seam.push(cem.index_of(row, col));
    }
    seam.reverse();
    Seam(seam)
}
