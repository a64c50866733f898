// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Filters as values
//!
//! A `Filter` names one of the library filters, or composes others:
//! `Cascade` threads an image through its children in order, and
//! `PerChannel` runs a greyscale child over each plane of a color
//! image.  Composites own their children, so a filter can be built
//! once, cloned, compared and applied any number of times.
//!
//! Filters can also be written down: `blur:5,edges,invert` parses to a
//! three-step cascade.

use crate::channels::per_channel;
use crate::errors::{CarveError, Result};
use crate::filters::{blurred, edges, invert, sharpened, vignette};
use crate::pixmap::{GreyImage, Pixmap};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Invert,
    Blur(usize),
    Sharpen(usize),
    Edges,
    Vignette,
    /// Each filter's output is the next one's input.  Empty is the
    /// identity.
    Cascade(Vec<Filter>),
    /// Lift a greyscale filter to color images.
    PerChannel(Box<Filter>),
}

impl Filter {
    /// Chain `filters` into one.
    pub fn compose(filters: Vec<Filter>) -> Self {
        Filter::Cascade(filters)
    }

    /// Run `inner` over each channel of a color image.
    pub fn per_channel(inner: Filter) -> Self {
        Filter::PerChannel(Box::new(inner))
    }

    /// The same filter, rewritten so that it accepts color images:
    /// every greyscale leaf is wrapped in `PerChannel`.
    pub fn for_color(self) -> Self {
        match self {
            Filter::Cascade(filters) => {
                Filter::Cascade(filters.into_iter().map(Filter::for_color).collect())
            }
            lifted @ Filter::PerChannel(_) => lifted,
            leaf => Filter::per_channel(leaf),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Blur(_) => "blur",
            Filter::Sharpen(_) => "sharpen",
            Filter::Edges => "edges",
            Filter::Vignette => "vignette",
            Filter::Cascade(_) => "cascade",
            Filter::PerChannel(_) => "per-channel",
        }
    }

    /// Apply to a greyscale image.
    pub fn apply_grey(&self, im: &GreyImage) -> Result<GreyImage> {
        match self {
            Filter::Invert => Ok(invert(im)),
            Filter::Blur(n) => blurred(im, *n),
            Filter::Sharpen(n) => sharpened(im, *n),
            Filter::Edges => Ok(edges(im)),
            Filter::Vignette => Ok(vignette(im)),
            Filter::Cascade(filters) => filters
                .iter()
                .try_fold(im.clone(), |acc, f| f.apply_grey(&acc)),
            Filter::PerChannel(_) => Err(CarveError::UnsupportedImage {
                filter: self.name(),
                kind: "greyscale",
            }),
        }
    }

    /// Apply to either kind of image.  Leaf filters only take
    /// greyscale images; color images need `PerChannel`.
    pub fn apply(&self, im: &Pixmap) -> Result<Pixmap> {
        match (self, im) {
            (Filter::Cascade(filters), _) => filters
                .iter()
                .try_fold(im.clone(), |acc, f| f.apply(&acc)),
            (Filter::PerChannel(inner), Pixmap::Color(color)) => {
                per_channel(color, |plane| inner.apply_grey(plane)).map(Pixmap::Color)
            }
            (_, Pixmap::Grey(grey)) => self.apply_grey(grey).map(Pixmap::Grey),
            (_, Pixmap::Color(_)) => Err(CarveError::UnsupportedImage {
                filter: self.name(),
                kind: im.kind(),
            }),
        }
    }
}

// "name" or "name:size"
fn parse_one(spec: &str) -> Result<Filter> {
    let bad = || CarveError::InvalidFilter {
        spec: spec.to_string(),
    };
    let mut parts = spec.trim().splitn(2, ':');
    let name = parts.next().unwrap_or("").trim();
    let size = match parts.next() {
        Some(n) => Some(n.trim().parse::<usize>().map_err(|_| bad())?),
        None => None,
    };
    match (name, size) {
        ("invert", None) => Ok(Filter::Invert),
        ("edges", None) => Ok(Filter::Edges),
        ("vignette", None) => Ok(Filter::Vignette),
        ("blur", Some(n)) => Ok(Filter::Blur(n)),
        ("sharpen", Some(n)) => Ok(Filter::Sharpen(n)),
        _ => Err(bad()),
    }
}

impl FromStr for Filter {
    type Err = CarveError;

    /// A single filter, or a comma-separated cascade of them.
    fn from_str(s: &str) -> Result<Self> {
        if s.contains(',') {
            s.split(',')
                .map(parse_one)
                .collect::<Result<Vec<_>>>()
                .map(Filter::Cascade)
        } else {
            parse_one(s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixmap::Image;

    fn grey() -> GreyImage {
        Image::new(4, 2, vec![8, 96, 142, 211, 0, 255, 30, 60]).unwrap()
    }

    #[test]
    fn empty_cascade_is_identity() {
        let im = grey();
        let out = Filter::compose(vec![]).apply_grey(&im).unwrap();
        assert_eq!(out, im);
    }

    #[test]
    fn cascade_runs_in_order() {
        let im = grey();
        let chained = Filter::compose(vec![Filter::Blur(3), Filter::Invert])
            .apply_grey(&im)
            .unwrap();
        let by_hand = invert(&blurred(&im, 3).unwrap());
        assert_eq!(chained, by_hand);

        let reversed = Filter::compose(vec![Filter::Invert, Filter::Blur(3)])
            .apply_grey(&im)
            .unwrap();
        assert_eq!(reversed, blurred(&invert(&im), 3).unwrap());
    }

    #[test]
    fn cascade_of_two_inversions_is_identity() {
        let im = grey();
        let twice = Filter::compose(vec![Filter::Invert, Filter::Invert]);
        assert_eq!(twice.apply_grey(&im).unwrap(), im);
    }

    #[test]
    fn no_filter_touches_its_input() {
        let im = grey();
        let color = Pixmap::Color(Image::filled(4, 3, [9u8, 120, 250]).unwrap());
        let before = (im.clone(), color.clone());
        let every = vec![
            Filter::Invert,
            Filter::Blur(3),
            Filter::Sharpen(5),
            Filter::Edges,
            Filter::Vignette,
        ];
        for f in every.iter() {
            f.apply_grey(&im).unwrap();
            f.clone().for_color().apply(&color).unwrap();
        }
        Filter::compose(every).apply_grey(&im).unwrap();
        assert_eq!((im, color), before);
    }

    #[test]
    fn color_needs_per_channel() {
        let color = Pixmap::Color(Image::filled(2, 2, [1u8, 2, 3]).unwrap());
        assert_eq!(
            Filter::Invert.apply(&color),
            Err(CarveError::UnsupportedImage {
                filter: "invert",
                kind: "color"
            })
        );
        let out = Filter::Invert.for_color().apply(&color).unwrap();
        assert_eq!(
            out,
            Pixmap::Color(Image::filled(2, 2, [254u8, 253, 252]).unwrap())
        );
    }

    #[test]
    fn per_channel_refuses_greyscale() {
        let lifted = Filter::per_channel(Filter::Edges);
        assert!(lifted.apply(&Pixmap::Grey(grey())).is_err());
    }

    #[test]
    fn for_color_lifts_every_leaf() {
        let lifted = Filter::compose(vec![Filter::Edges, Filter::Blur(5)]).for_color();
        assert_eq!(
            lifted,
            Filter::Cascade(vec![
                Filter::per_channel(Filter::Edges),
                Filter::per_channel(Filter::Blur(5)),
            ])
        );
    }

    #[test]
    fn parses_descriptions() {
        assert_eq!("invert".parse::<Filter>(), Ok(Filter::Invert));
        assert_eq!("blur:7".parse::<Filter>(), Ok(Filter::Blur(7)));
        assert_eq!(
            "sharpen:3, edges".parse::<Filter>(),
            Ok(Filter::Cascade(vec![Filter::Sharpen(3), Filter::Edges]))
        );
        assert!("blur".parse::<Filter>().is_err());
        assert!("edges:3".parse::<Filter>().is_err());
        assert!("emboss".parse::<Filter>().is_err());
    }
}
