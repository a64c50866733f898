// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is how much it stands out from its
//! neighbours, and seam carving removes the paths with the least of it.
//! Here the color image is first reduced to luma, and the energy is the
//! Sobel gradient magnitude of that luma, i.e. the `edges` filter.
//! There is no forward-energy term.

use crate::filters::edges;
use crate::normalize::round_half_even;
use crate::pixmap::{ColorImage, GreyImage};

/// Luma of one RGB triple, ITU-R 601 weights, ties to even.
#[inline]
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    let y = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    // The weights sum to one, so y is already inside [0, 255].
    round_half_even(y) as u8
}

/// Convert a color image to greyscale.
pub fn greyscale_from_color(im: &ColorImage) -> GreyImage {
    im.map(luma)
}

/// Per-pixel energy of a greyscale image, in [0, 255].
pub fn compute_energy(grey: &GreyImage) -> GreyImage {
    edges(grey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixmap::Image;

    const COLORS: [[u8; 3]; 6] = [
        [0, 0, 0],
        [255, 255, 255],
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [244, 173, 198],
    ];

    #[test]
    fn luma_weights() {
        let im = Image::new(3, 2, COLORS.to_vec()).unwrap();
        let grey = greyscale_from_color(&im);
        // 0.299 * 255 = 76.245, 0.587 * 255 = 149.685, 0.114 * 255 = 29.07
        assert_eq!(grey.pixels(), &[0, 255, 76, 150, 29, 197]);
    }

    #[test]
    fn luma_of_grey_is_grey() {
        for v in 0..=255u8 {
            assert_eq!(luma([v, v, v]), v);
        }
    }

    #[test]
    fn energy_is_edge_magnitude() {
        let grey = Image::new(5, 4, vec![9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9])
            .unwrap();
        assert_eq!(compute_energy(&grey), edges(&grey));
        let flat = Image::filled(5, 4, 40u8).unwrap();
        assert!(compute_energy(&flat).pixels().iter().all(|e| *e == 0));
    }
}
