// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rounding and clipping numeric buffers back into pixel range.
//!
//! There is exactly one rounding rule in this crate, and it is
//! round-half-to-even.  The Normalizer, the greyscale conversion and
//! the edge magnitude all go through `round_half_even`; mixing rules
//! would make outputs differ by one at exact halves.

use crate::pixmap::{FloatImage, GreyImage, Image};
use num_traits::{clamp, NumCast};

/// Round to the nearest integer, ties to even.
#[inline]
pub fn round_half_even(v: f64) -> f64 {
    v.round_ties_even()
}

/// Clamp every value of a buffer into [0, 255], then round it.  Works
/// in place, so only ever call this on a buffer you own.
pub fn round_and_clip(buffer: &mut [f64]) {
    for v in buffer.iter_mut() {
        // Correlations of finite pixels with finite weights stay finite.
        debug_assert!(v.is_finite(), "non-finite value {} in filter output", v);
        *v = round_half_even(clamp(*v, 0.0, 255.0));
    }
}

/// Finish a correlation: round and clip, then narrow to pixels.
pub fn normalize(buffer: FloatImage) -> GreyImage {
    let (width, height) = buffer.dimensions();
    let mut values = buffer.into_pixels();
    round_and_clip(&mut values);
    let pixels = values
        .into_iter()
        .map(|v| <u8 as NumCast>::from(v).unwrap_or(0))
        .collect();
    Image::from_raw_parts(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_even() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(2.500001), 3.0);
        assert_eq!(round_half_even(-2.5), -2.0);
    }

    #[test]
    #[should_panic(expected = "non-finite value")]
    #[cfg(debug_assertions)]
    fn nan_is_caught_in_debug_builds() {
        let mut buf = [1.0, std::f64::NAN];
        round_and_clip(&mut buf);
    }

    #[test]
    fn clips_into_pixel_range() {
        let mut buf = [-40.2, -0.4, 0.0, 127.5, 128.5, 254.6, 255.0, 255.7, 1e9];
        round_and_clip(&mut buf);
        assert_eq!(buf, [0.0, 0.0, 0.0, 128.0, 128.0, 255.0, 255.0, 255.0, 255.0]);
        assert!(buf.iter().all(|v| *v >= 0.0 && *v <= 255.0));
    }

    #[test]
    fn normalize_narrows_to_bytes() {
        let im = Image::new(3, 1, vec![-3.0, 28.333, 300.0]).unwrap();
        assert_eq!(normalize(im).pixels(), &[0, 28, 255]);
    }
}
