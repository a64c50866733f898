// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spatial filters and seam carving over in-memory images.
//!
//! Every filter is a border-replicated correlation followed by
//! rounding and clipping; seam carving narrows a color image one
//! minimum-energy seam at a time.

pub mod ternary;

pub mod errors;
pub use errors::{CarveError, Result};

pub mod pixmap;
pub use pixmap::{ColorImage, FloatImage, GreyImage, Image, Pixmap, Rgb};

pub mod kernel;
pub use kernel::Kernel;

pub mod correlate;
pub use correlate::correlate;

pub mod normalize;
pub use normalize::{normalize, round_and_clip, round_half_even};

pub mod filters;
pub use filters::{blurred, edges, invert, sharpened, vignette};

pub mod channels;
pub use channels::{per_channel, recombine_rgb, split_rgb};

pub mod filter;
pub use filter::Filter;

pub mod energy;
pub use energy::{compute_energy, greyscale_from_color};

pub mod seamfinder;
pub use seamfinder::{cumulative_energy_map, minimum_energy_seam, CumulativeMap, Seam};

pub mod seamcarver;
pub use seamcarver::{remove_seam, seam_carve, seam_carve_height, SeamCarver};

pub mod io;
