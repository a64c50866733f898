// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the filter and carving core.
//!
//! Every core operation is a pure computation, so none of these are
//! transient: an operation either returns a complete image or one of
//! these, never a partial result.

use failure::Fail;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, CarveError>;

/// Everything that can go wrong inside the core.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CarveError {
    /// Width or height is zero, or the pixel count does not match them.
    #[fail(
        display = "invalid dimensions: {}x{} image holding {} pixels",
        width, height, len
    )]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },

    /// The weight table does not cover the (2r+1)² window.
    #[fail(
        display = "kernel of radius {} needs {} weights, got {}",
        radius, expected, got
    )]
    KernelSizeMismatch {
        radius: usize,
        expected: usize,
        got: usize,
    },

    /// Planes handed to the channel recombiner disagree on their shape.
    #[fail(display = "channel planes have differing dimensions")]
    ChannelMismatch,

    /// Asked to remove at least as many seams as there are columns
    /// (`axis` "wide") or rows (`axis` "tall").
    #[fail(
        display = "cannot remove {} seams from an image {} pixels {}",
        requested, extent, axis
    )]
    SeamCountOutOfRange {
        requested: usize,
        extent: usize,
        axis: &'static str,
    },

    /// Carving only shrinks; the target is larger than the image.
    #[fail(
        display = "cannot carve a {}x{} image up to {}x{}",
        width, height, target_width, target_height
    )]
    CannotEnlarge {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },

    /// A seam that does not hold exactly one in-row index per row.
    #[fail(display = "invalid seam: {}", reason)]
    InvalidSeam { reason: String },

    /// A filter was applied to the wrong kind of image.
    #[fail(display = "filter '{}' cannot be applied to a {} image", filter, kind)]
    UnsupportedImage {
        filter: &'static str,
        kind: &'static str,
    },

    /// A filter description that could not be parsed.
    #[fail(display = "unrecognised filter description '{}'", spec)]
    InvalidFilter { spec: String },

    /// Carving stopped between iterations at the caller's request.
    #[fail(display = "carving cancelled after {} seams", completed)]
    Cancelled { completed: usize },
}
