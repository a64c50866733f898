// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The greyscale filter library
//!
//! Each filter reads a greyscale image and returns a new one; none of
//! them touches its argument.  Apart from `invert` they are all a
//! correlation (or two) followed by `normalize`, so their outputs are
//! integers in [0, 255].  Use `channels::per_channel` to run any of
//! them over a color image.

use crate::correlate::correlate;
use crate::errors::Result;
use crate::kernel::Kernel;
use crate::normalize::{normalize, round_half_even};
use crate::pixmap::{GreyImage, Image};
use std::f64::consts::E;
use tracing::debug;

/// Photographic negative: every pixel becomes `255 - value`.
pub fn invert(im: &GreyImage) -> GreyImage {
    im.map(|p| 255 - p)
}

/// Box blur with a kernel of size `n`.  See `Kernel::box_blur` for
/// which sizes are accepted.
pub fn blurred(im: &GreyImage, n: usize) -> Result<GreyImage> {
    let kernel = Kernel::box_blur(n)?;
    debug!(width = im.width(), height = im.height(), n, "blur");
    Ok(normalize(correlate(im, &kernel)))
}

/// Unsharp-mask sharpening with a kernel of size `n`.
pub fn sharpened(im: &GreyImage, n: usize) -> Result<GreyImage> {
    let kernel = Kernel::unsharp(n)?;
    debug!(width = im.width(), height = im.height(), n, "sharpen");
    Ok(normalize(correlate(im, &kernel)))
}

/// Sobel edge magnitude, `round(sqrt(gx² + gy²))` clipped to 255.
pub fn edges(im: &GreyImage) -> GreyImage {
    let (width, height) = im.dimensions();
    debug!(width, height, "edges");
    let gx = correlate(im, &Kernel::sobel_x());
    let gy = correlate(im, &Kernel::sobel_y());
    let magnitude = gx
        .pixels()
        .iter()
        .zip(gy.pixels())
        .map(|(x, y)| round_half_even((x * x + y * y).sqrt()))
        .collect();
    normalize(Image::from_raw_parts(width, height, magnitude))
}

// A normalised 1-D Gaussian of `ksize` taps, with sigma derived from
// the size the same way OpenCV's getGaussianKernel does.
fn gaussian_taps(ksize: usize) -> Vec<f64> {
    let sigma = 0.4 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let centre = (ksize as f64 - 1.0) / 2.0;
    let taps: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - centre;
            E.powf(-(d * d) / (2.0 * sigma * sigma))
        })
        .collect();
    let total: f64 = taps.iter().sum();
    taps.into_iter().map(|t| t / total).collect()
}

/// Darken towards the borders.  The image is weighted by the outer
/// product of a vertical and a horizontal Gaussian spanning the whole
/// frame, scaled so that the weights have a Frobenius norm of 255.
pub fn vignette(im: &GreyImage) -> GreyImage {
    let (width, height) = im.dimensions();
    debug!(width, height, "vignette");
    let (across, down) = (gaussian_taps(width), gaussian_taps(height));
    let weights: Vec<f64> = down
        .iter()
        .flat_map(|d| across.iter().map(move |a| d * a))
        .collect();
    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    let shaded = weights
        .iter()
        .zip(im.pixels())
        .map(|(w, p)| w * 255.0 / norm * f64::from(*p))
        .collect();
    normalize(Image::from_raw_parts(width, height, shaded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_pixel() -> GreyImage {
        let mut pixels = vec![0u8; 121];
        pixels[60] = 255;
        Image::new(11, 11, pixels).unwrap()
    }

    #[test]
    fn invert_small_row() {
        let im = Image::new(4, 1, vec![8, 96, 142, 211]).unwrap();
        assert_eq!(invert(&im).pixels(), &[247, 159, 113, 44]);
        assert_eq!(im.pixels(), &[8, 96, 142, 211]);
    }

    #[test]
    fn invert_is_an_involution() {
        let im = Image::new(5, 3, (0..15).map(|v| v * 17).collect()).unwrap();
        assert_eq!(invert(&invert(&im)), im);
    }

    #[test]
    fn blur_of_size_one_is_identity() {
        let im = centered_pixel();
        assert_eq!(blurred(&im, 1).unwrap(), im);
    }

    #[test]
    fn blur_spreads_centered_pixel() {
        let out = blurred(&centered_pixel(), 3).unwrap();
        let mut expected = vec![0u8; 44];
        for _ in 0..3 {
            expected.extend_from_slice(&[0, 0, 0, 0, 28, 28, 28, 0, 0, 0, 0]);
        }
        expected.extend(vec![0u8; 44]);
        assert_eq!(out.pixels(), &expected[..]);
    }

    #[test]
    fn blur_leaves_constant_images_alone() {
        for value in [0u8, 77, 255].iter() {
            let im = Image::filled(6, 5, *value).unwrap();
            for n in [3, 7].iter() {
                assert_eq!(blurred(&im, *n).unwrap(), im);
            }
        }
    }

    #[test]
    fn even_blur_sizes_are_rejected() {
        assert!(blurred(&centered_pixel(), 4).is_err());
        assert!(sharpened(&centered_pixel(), 2).is_err());
    }

    #[test]
    fn sharpen_of_constant_is_constant() {
        let im = Image::filled(4, 4, 100u8).unwrap();
        assert_eq!(sharpened(&im, 3).unwrap(), im);
    }

    #[test]
    fn sharpen_clips_the_peak() {
        let out = sharpened(&centered_pixel(), 3).unwrap();
        // 255 * (2 - 1/9) overshoots; the ring goes negative.
        assert_eq!(out[(5, 5)], 255);
        assert_eq!(out[(4, 5)], 0);
        assert_eq!(out[(0, 0)], 0);
    }

    #[test]
    fn edges_ring_the_centered_pixel() {
        let out = edges(&centered_pixel());
        for row in 0..11 {
            for col in 0..11 {
                let ring = (4..=6).contains(&row)
                    && (4..=6).contains(&col)
                    && !(row == 5 && col == 5);
                assert_eq!(out[(row, col)], if ring { 255 } else { 0 });
            }
        }
    }

    #[test]
    fn edges_magnitude_is_rounded() {
        // gx = 4 * 10 on the boundary columns, gy = 0.
        let im = Image::new(2, 1, vec![0u8, 10]).unwrap();
        assert_eq!(edges(&im).pixels(), &[40, 40]);
    }

    #[test]
    fn vignette_darkens_corners_more_than_centre() {
        let im = Image::filled(9, 7, 20u8).unwrap();
        let out = vignette(&im);
        assert!(out[(3, 4)] > out[(0, 0)]);
        assert_eq!(out[(0, 0)], out[(6, 8)]);
        assert_eq!(im, Image::filled(9, 7, 20u8).unwrap());
    }

    #[test]
    fn vignette_weights_are_gaussian() {
        // 5x3 of ones stays below 255, so the scaled weights show through.
        let out = vignette(&Image::filled(5, 3, 1u8).unwrap());
        assert_eq!(out.row(0), &[17, 48, 67, 48, 17]);
        assert_eq!(out.row(1), &[37, 104, 147, 104, 37]);
        assert_eq!(out.row(2), out.row(0));
    }

    #[test]
    fn vignette_clips_the_bright_middle() {
        let out = vignette(&Image::filled(9, 7, 20u8).unwrap());
        let top: [u8; 9] = [38, 90, 168, 245, 255, 245, 168, 90, 38];
        let second: [u8; 9] = [100, 239, 255, 255, 255, 255, 255, 239, 100];
        let third: [u8; 9] = [179, 255, 255, 255, 255, 255, 255, 255, 179];
        let middle: [u8; 9] = [218, 255, 255, 255, 255, 255, 255, 255, 218];
        for (row, expected) in [top, second, third, middle, third, second, top]
            .iter()
            .enumerate()
        {
            assert_eq!(out.row(row), &expected[..]);
        }
    }
}
