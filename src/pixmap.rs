// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image value type.
//!
//! An `Image<P>` is a row-major grid of pixels of any `Copy` type: `u8`
//! for greyscale, `[u8; 3]` for color, and `f64` or `u32` for the
//! unclamped intermediate buffers that correlation and the cumulative
//! energy map produce.  Coordinates are always `(row, col)`, with row 0
//! at the top.  Images are values: every transform in this crate builds
//! a fresh one and never writes through its input.

use crate::errors::{CarveError, Result};
use std::ops::Index;

/// An RGB triple.
pub type Rgb = [u8; 3];

/// A single-channel image with values in [0, 255].
pub type GreyImage = Image<u8>;

/// A three-channel image.
pub type ColorImage = Image<Rgb>;

/// An unrounded, unclamped numeric buffer.
pub type FloatImage = Image<f64>;

/// A row-major grid of pixels with a validated shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<P> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

impl<P: Copy> Image<P> {
    /// Wrap a pixel vector.  Fails unless both dimensions are non-zero
    /// and the vector holds exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<P>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(CarveError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel is `value`.
    pub fn filled(width: usize, height: usize, value: P) -> Result<Self> {
        Image::new(width, height, vec![value; width * height])
    }

    // Only for callers that derived the shape from an image that was
    // already validated.
    pub(crate) fn from_raw_parts(width: usize, height: usize, pixels: Vec<P>) -> Self {
        debug_assert!(width > 0 && height > 0 && pixels.len() == width * height);
        Image {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`, in that order, like the image crate.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The flat, row-major pixel storage.
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    // All of the index math lives here and nowhere else.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// The pixel at `(row, col)`, if it lies inside the image.
    pub fn get(&self, row: usize, col: usize) -> Option<P> {
        if row < self.height && col < self.width {
            Some(self.pixels[self.index_of(row, col)])
        } else {
            None
        }
    }

    /// The pixel at `(row, col)` with out-of-range coordinates clamped
    /// to the nearest edge, so the border is replicated outward.
    #[inline]
    pub fn pixel_at(&self, row: isize, col: isize) -> P {
        let row = clamp_coordinate(row, self.height);
        let col = clamp_coordinate(col, self.width);
        self.pixels[self.index_of(row, col)]
    }

    /// One row of pixels.
    pub fn row(&self, row: usize) -> &[P] {
        let start = self.index_of(row, 0);
        &self.pixels[start..start + self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        self.pixels.chunks(self.width)
    }

    /// Apply `f` to every pixel, producing a new image of the same shape.
    pub fn map<Q, F>(&self, f: F) -> Image<Q>
    where
        Q: Copy,
        F: Fn(P) -> Q,
    {
        Image::from_raw_parts(
            self.width,
            self.height,
            self.pixels.iter().map(|p| f(*p)).collect(),
        )
    }

    /// Swap rows for columns.  Horizontal seams of an image are the
    /// vertical seams of its transpose.
    pub fn transpose(&self) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for col in 0..self.width {
            for row in 0..self.height {
                pixels.push(self.pixels[self.index_of(row, col)]);
            }
        }
        Image::from_raw_parts(self.height, self.width, pixels)
    }
}

#[inline]
fn clamp_coordinate(c: isize, len: usize) -> usize {
    if c < 0 {
        0
    } else if c as usize >= len {
        len - 1
    } else {
        c as usize
    }
}

impl<P: Copy> Index<(usize, usize)> for Image<P> {
    type Output = P;

    /// Addressing by `(row, col)`.
    fn index(&self, (row, col): (usize, usize)) -> &P {
        &self.pixels[self.index_of(row, col)]
    }
}

/// Either kind of image, for callers that decide at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Pixmap {
    Grey(GreyImage),
    Color(ColorImage),
}

impl Pixmap {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Pixmap::Grey(im) => im.dimensions(),
            Pixmap::Color(im) => im.dimensions(),
        }
    }

    /// "greyscale" or "color", for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Pixmap::Grey(_) => "greyscale",
            Pixmap::Color(_) => "color",
        }
    }
}

impl From<GreyImage> for Pixmap {
    fn from(im: GreyImage) -> Self {
        Pixmap::Grey(im)
    }
}

impl From<ColorImage> for Pixmap {
    fn from(im: ColorImage) -> Self {
        Pixmap::Color(im)
    }
}
