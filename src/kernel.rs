// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Correlation kernels
//!
//! A kernel is a square table of `(2r+1)²` weights laid out row-major,
//! so the weight for offset `(dr, dc)` from the target pixel lives at
//! `(dr + r) * (2r + 1) + (dc + r)`.  Kernels are immutable once built
//! and are passed by reference into every correlation.

use crate::errors::{CarveError, Result};

/// A validated square weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: usize,
    weights: Vec<f64>,
}

const SOBEL_X: [f64; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f64; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

impl Kernel {
    /// Build a kernel, rejecting a table that doesn't exactly cover
    /// the window.
    pub fn new(radius: usize, weights: Vec<f64>) -> Result<Self> {
        let side = 2 * radius + 1;
        let expected = side * side;
        if weights.len() != expected {
            return Err(CarveError::KernelSizeMismatch {
                radius,
                expected,
                got: weights.len(),
            });
        }
        Ok(Kernel { radius, weights })
    }

    /// The kernel that reproduces its input.
    pub fn identity(radius: usize) -> Self {
        let side = 2 * radius + 1;
        let mut weights = vec![0.0; side * side];
        weights[(side * side) / 2] = 1.0;
        Kernel { radius, weights }
    }

    /// A uniform box blur for a kernel size of `n`.
    ///
    /// The radius is `n / 2` and the table holds `n * n` weights of
    /// `1 / (n * n)`.  That only fills the window for odd `n`; an even
    /// (or zero) size is refused with `KernelSizeMismatch`.
    pub fn box_blur(n: usize) -> Result<Self> {
        let cells = n * n;
        Kernel::new(n / 2, vec![1.0 / cells as f64; cells])
    }

    /// An unsharp mask: twice the identity minus a box blur of the same
    /// size.  Same sizing rule as `box_blur`.
    pub fn unsharp(n: usize) -> Result<Self> {
        let cells = n * n;
        let surround = -1.0 / cells as f64;
        let mut weights = vec![surround; cells];
        if cells > 0 {
            weights[cells / 2] = 2.0 - 1.0 / cells as f64;
        }
        Kernel::new(n / 2, weights)
    }

    /// Horizontal Sobel gradient.
    pub fn sobel_x() -> Self {
        Kernel {
            radius: 1,
            weights: SOBEL_X.to_vec(),
        }
    }

    /// Vertical Sobel gradient.
    pub fn sobel_y() -> Self {
        Kernel {
            radius: 1,
            weights: SOBEL_Y.to_vec(),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Width (and height) of the window.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_weight_count() {
        assert!(Kernel::new(1, vec![0.0; 9]).is_ok());
        assert_eq!(
            Kernel::new(1, vec![0.0; 8]),
            Err(CarveError::KernelSizeMismatch {
                radius: 1,
                expected: 9,
                got: 8
            })
        );
    }

    #[test]
    fn identity_has_single_centre_weight() {
        let k = Kernel::identity(1);
        assert_eq!(k.weights(), &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(Kernel::identity(0).weights(), &[1.0]);
    }

    #[test]
    fn blur_weights_are_uniform() {
        let k = Kernel::box_blur(3).unwrap();
        assert_eq!(k.radius(), 1);
        assert!(k.weights().iter().all(|w| *w == 1.0 / 9.0));
        assert_eq!(Kernel::box_blur(1).unwrap().weights(), &[1.0]);
    }

    #[test]
    fn even_sizes_do_not_fill_the_window() {
        assert_eq!(
            Kernel::box_blur(4),
            Err(CarveError::KernelSizeMismatch {
                radius: 2,
                expected: 25,
                got: 16
            })
        );
        assert!(Kernel::unsharp(2).is_err());
        assert!(Kernel::box_blur(0).is_err());
        assert!(Kernel::unsharp(0).is_err());
    }

    #[test]
    fn unsharp_sums_to_one() {
        let k = Kernel::unsharp(3).unwrap();
        assert_eq!(k.weights()[4], 2.0 - 1.0 / 9.0);
        assert_eq!(k.weights()[0], -1.0 / 9.0);
        let total: f64 = k.weights().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
