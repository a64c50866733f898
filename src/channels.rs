// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Running greyscale filters over color images
//!
//! A color image is split into its R, G and B planes, the greyscale
//! filter is run over each plane on its own, and the results are zipped
//! back into triples.  This is only sound for filters that keep the
//! shape of their input; a seam remover would hand back planes of
//! different widths, which `recombine_rgb` refuses.

use crate::errors::{CarveError, Result};
use crate::pixmap::{ColorImage, GreyImage, Image};

/// Split a color image into its (R, G, B) planes.
pub fn split_rgb(im: &ColorImage) -> (GreyImage, GreyImage, GreyImage) {
    let plane = |c: usize| im.map(|p| p[c]);
    (plane(0), plane(1), plane(2))
}

/// Zip three planes back into a color image.
pub fn recombine_rgb(r: &GreyImage, g: &GreyImage, b: &GreyImage) -> Result<ColorImage> {
    if r.dimensions() != g.dimensions() || r.dimensions() != b.dimensions() {
        return Err(CarveError::ChannelMismatch);
    }
    let pixels = r
        .pixels()
        .iter()
        .zip(g.pixels())
        .zip(b.pixels())
        .map(|((r, g), b)| [*r, *g, *b])
        .collect();
    let (width, height) = r.dimensions();
    Ok(Image::from_raw_parts(width, height, pixels))
}

/// Run `filter` over every plane of `im` and recombine.
pub fn per_channel<F>(im: &ColorImage, filter: F) -> Result<ColorImage>
where
    F: Fn(&GreyImage) -> Result<GreyImage> + Sync,
{
    let (r, g, b) = split_rgb(im);
    let (r, g, b) = filter_planes(&filter, [&r, &g, &b])?;
    recombine_rgb(&r, &g, &b)
}

#[cfg(not(feature = "threaded"))]
fn filter_planes<F>(filter: &F, planes: [&GreyImage; 3]) -> Result<(GreyImage, GreyImage, GreyImage)>
where
    F: Fn(&GreyImage) -> Result<GreyImage> + Sync,
{
    Ok((filter(planes[0])?, filter(planes[1])?, filter(planes[2])?))
}

// The planes share nothing, so each gets its own thread.
#[cfg(feature = "threaded")]
fn filter_planes<F>(filter: &F, planes: [&GreyImage; 3]) -> Result<(GreyImage, GreyImage, GreyImage)>
where
    F: Fn(&GreyImage) -> Result<GreyImage> + Sync,
{
    let rejoin = |result: std::thread::Result<Result<GreyImage>>| {
        result.unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    };
    let (r, g, b) = crossbeam::scope(|s| {
        let r = s.spawn(move |_| filter(planes[0]));
        let g = s.spawn(move |_| filter(planes[1]));
        let b = filter(planes[2]);
        (rejoin(r.join()), rejoin(g.join()), b)
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
    Ok((r?, g?, b?))
}
