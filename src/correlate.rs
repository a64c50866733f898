// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Border-replicated 2D correlation
//!
//! Every filter in the crate is a correlation followed by
//! normalisation.  The output is the raw weighted sum at every
//! position, neither rounded nor clamped.  Neighbours that fall off the
//! image are read from the nearest edge pixel (see
//! `Image::pixel_at`), never zero-padded and never wrapped.
//!
//! Rows of the output are independent of one another, so with the
//! `threaded` feature the output is cut into bands of rows and each
//! band is filled on its own thread.  Each cell sums its window in the
//! same order either way, so the results are bit-identical.

use crate::kernel::Kernel;
use crate::pixmap::{FloatImage, Image};
use itertools::iproduct;
use tracing::trace;

/// Correlate `image` with `kernel`.
pub fn correlate<P>(image: &Image<P>, kernel: &Kernel) -> FloatImage
where
    P: Copy + Into<f64> + Sync,
{
    let (width, height) = image.dimensions();
    trace!(width, height, radius = kernel.radius(), "correlate");
    let mut out = vec![0.0; width * height];
    fill_rows(image, kernel, &mut out);
    Image::from_raw_parts(width, height, out)
}

// One output row.  The window is walked top-to-bottom, left-to-right,
// in step with the kernel's row-major weights.
fn correlate_row<P>(image: &Image<P>, kernel: &Kernel, row: usize, out: &mut [f64])
where
    P: Copy + Into<f64>,
{
    let r = kernel.radius() as isize;
    let (row, weights) = (row as isize, kernel.weights());
    for (col, cell) in out.iter_mut().enumerate() {
        let col = col as isize;
        *cell = iproduct!(-r..=r, -r..=r)
            .zip(weights)
            .fold(0.0, |acc, ((dr, dc), w)| {
                let p: f64 = image.pixel_at(row + dr, col + dc).into();
                acc + p * w
            });
    }
}

#[cfg(not(feature = "threaded"))]
fn fill_rows<P>(image: &Image<P>, kernel: &Kernel, out: &mut [f64])
where
    P: Copy + Into<f64> + Sync,
{
    for (row, chunk) in out.chunks_mut(image.width()).enumerate() {
        correlate_row(image, kernel, row, chunk);
    }
}

#[cfg(feature = "threaded")]
fn fill_rows<P>(image: &Image<P>, kernel: &Kernel, out: &mut [f64])
where
    P: Copy + Into<f64> + Sync,
{
    let width = image.width();
    let threads = num_cpus::get().max(1);
    let band = (image.height() + threads - 1) / threads;

    crossbeam::scope(|s| {
        for (b, chunk) in out.chunks_mut(band * width).enumerate() {
            s.spawn(move |_| {
                for (i, row_out) in chunk.chunks_mut(width).enumerate() {
                    correlate_row(image, kernel, b * band + i, row_out);
                }
            });
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
}
