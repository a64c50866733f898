// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Removing `k` columns is `k` rounds of: greyscale, energy,
//! cumulative map, cheapest seam, delete it.  Every round starts over
//! from the image the previous round produced; nothing is carried
//! between rounds, so each one costs a full pass over the current image.
//!
//! Rows are removed by carving the transposed image and transposing the
//! result back.

use crate::energy::{compute_energy, greyscale_from_color};
use crate::errors::{CarveError, Result};
use crate::pixmap::{ColorImage, Image};
use crate::seamfinder::{cumulative_energy_map, minimum_energy_seam, Seam};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// A copy of `image` with the seam's pixels left out, one column
/// narrower.  The seam must hold exactly one index inside each row.
pub fn remove_seam<P: Copy>(image: &Image<P>, seam: &Seam) -> Result<Image<P>> {
    let (width, height) = image.dimensions();
    if width == 1 {
        return Err(CarveError::SeamCountOutOfRange {
            requested: 1,
            extent: width,
            axis: "wide",
        });
    }
    if seam.len() != height {
        return Err(CarveError::InvalidSeam {
            reason: format!("{} indices for {} rows", seam.len(), height),
        });
    }

    let mut pixels = Vec::with_capacity((width - 1) * height);
    for (row, (line, cut)) in image.rows().zip(seam.indices()).enumerate() {
        if cut / width != row {
            return Err(CarveError::InvalidSeam {
                reason: format!("index {} is not in row {}", cut, row),
            });
        }
        let cut = cut % width;
        pixels.extend_from_slice(&line[..cut]);
        pixels.extend_from_slice(&line[cut + 1..]);
    }
    Image::new(width - 1, height, pixels)
}

// One round: find the cheapest vertical seam of the current image and
// drop it.
fn carve_once(image: &ColorImage) -> Result<ColorImage> {
    let grey = greyscale_from_color(image);
    let seam = minimum_energy_seam(&cumulative_energy_map(&compute_energy(&grey)));
    trace!(width = image.width(), seam = ?seam.columns(image.width()), "carving");
    remove_seam(image, &seam)
}

/// Holds the image to be carved, and optionally a flag that stops
/// carving between rounds.
pub struct SeamCarver<'a> {
    image: &'a ColorImage,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> SeamCarver<'a> {
    pub fn new(image: &'a ColorImage) -> Self {
        SeamCarver {
            image,
            cancel: None,
        }
    }

    /// Check `flag` before every round and give up with `Cancelled`
    /// once it is set.  A round in progress always finishes.
    pub fn with_cancel(self, flag: &'a AtomicBool) -> Self {
        SeamCarver {
            cancel: Some(flag),
            ..self
        }
    }

    /// Remove `k` columns.  `k` must leave at least one column.
    pub fn carve_columns(&self, k: usize) -> Result<ColorImage> {
        check_count(k, self.image.width(), "wide")?;
        carve_columns_of(self.image, k, self.cancel)
    }

    /// Remove `k` rows.  `k` must leave at least one row.
    pub fn carve_rows(&self, k: usize) -> Result<ColorImage> {
        check_count(k, self.image.height(), "tall")?;
        if k == 0 {
            return Ok(self.image.clone());
        }
        let flipped = self.image.transpose();
        Ok(carve_columns_of(&flipped, k, self.cancel)?.transpose())
    }

    /// Carve down to `newwidth` x `newheight`: columns first, then rows.
    pub fn resize(&self, newwidth: usize, newheight: usize) -> Result<ColorImage> {
        let (width, height) = self.image.dimensions();
        if newwidth > width || newheight > height {
            return Err(CarveError::CannotEnlarge {
                width,
                height,
                target_width: newwidth,
                target_height: newheight,
            });
        }
        let narrowed = self.carve_columns(width - newwidth)?;
        SeamCarver {
            image: &narrowed,
            cancel: self.cancel,
        }
        .carve_rows(height - newheight)
    }
}

// At least one column (or row) has to survive.
fn check_count(k: usize, extent: usize, axis: &'static str) -> Result<()> {
    if k >= extent {
        return Err(CarveError::SeamCountOutOfRange {
            requested: k,
            extent,
            axis,
        });
    }
    Ok(())
}

// Callers have already checked `k` against the width.
fn carve_columns_of(
    image: &ColorImage,
    k: usize,
    cancel: Option<&AtomicBool>,
) -> Result<ColorImage> {
    let (width, height) = image.dimensions();
    debug!(width, height, seams = k, "seam carving");

    let mut scratch = image.clone();
    for completed in 0..k {
        if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            return Err(CarveError::Cancelled { completed });
        }
        scratch = carve_once(&scratch)?;
    }
    Ok(scratch)
}

/// Remove `k` vertical seams from `image`, one at a time.
pub fn seam_carve(image: &ColorImage, k: usize) -> Result<ColorImage> {
    SeamCarver::new(image).carve_columns(k)
}

/// Remove `k` horizontal seams from `image`, one at a time.
pub fn seam_carve_height(image: &ColorImage, k: usize) -> Result<ColorImage> {
    SeamCarver::new(image).carve_rows(k)
}
