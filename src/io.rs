// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing image files
//!
//! A thin bridge between the `image` crate's buffers and this crate's
//! `Image` values.  The format is picked from the file extension.
//! Nothing in the filter or carving core depends on this module.

use crate::energy::greyscale_from_color;
use crate::pixmap::{ColorImage, GreyImage, Image, Pixmap};
use failure::Error;
use image::{ColorType, DynamicImage, RgbImage};
use std::convert::TryInto;
use std::path::Path;

fn from_rgb_buffer(buffer: RgbImage) -> Result<ColorImage, Error> {
    let (width, height) = buffer.dimensions();
    let pixels = buffer
        .into_raw()
        .chunks(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    Ok(Image::new(width as usize, height as usize, pixels)?)
}

/// Load any supported file as a color image.  Greyscale files have
/// their single channel copied into all three.
pub fn load_color_image<P: AsRef<Path>>(path: P) -> Result<ColorImage, Error> {
    from_rgb_buffer(image::open(path)?.to_rgb())
}

/// Load any supported file as a greyscale image.  8-bit luma files
/// (with or without alpha) are taken as they are; anything else is
/// converted with `greyscale_from_color`, not the `image` crate's own
/// luma weights.
pub fn load_greyscale_image<P: AsRef<Path>>(path: P) -> Result<GreyImage, Error> {
    match image::open(path)? {
        DynamicImage::ImageLuma8(buffer) => {
            let (width, height) = buffer.dimensions();
            Ok(Image::new(width as usize, height as usize, buffer.into_raw())?)
        }
        DynamicImage::ImageLumaA8(buffer) => {
            let (width, height) = buffer.dimensions();
            let luma = buffer.into_raw().chunks(2).map(|c| c[0]).collect();
            Ok(Image::new(width as usize, height as usize, luma)?)
        }
        other => Ok(greyscale_from_color(&from_rgb_buffer(other.to_rgb())?)),
    }
}

/// Load a file as whichever kind of image the caller asks for.
pub fn load_pixmap<P: AsRef<Path>>(path: P, grey: bool) -> Result<Pixmap, Error> {
    if grey {
        Ok(Pixmap::Grey(load_greyscale_image(path)?))
    } else {
        Ok(Pixmap::Color(load_color_image(path)?))
    }
}

pub fn save_greyscale_image<P: AsRef<Path>>(im: &GreyImage, path: P) -> Result<(), Error> {
    let (width, height) = im.dimensions();
    image::save_buffer(
        path,
        im.pixels(),
        width.try_into()?,
        height.try_into()?,
        ColorType::Gray(8),
    )?;
    Ok(())
}

pub fn save_color_image<P: AsRef<Path>>(im: &ColorImage, path: P) -> Result<(), Error> {
    let (width, height) = im.dimensions();
    let raw: Vec<u8> = im.pixels().iter().flat_map(|p| p.iter().cloned()).collect();
    image::save_buffer(
        path,
        &raw,
        width.try_into()?,
        height.try_into()?,
        ColorType::RGB(8),
    )?;
    Ok(())
}

pub fn save_pixmap<P: AsRef<Path>>(im: &Pixmap, path: P) -> Result<(), Error> {
    match im {
        Pixmap::Grey(grey) => save_greyscale_image(grey, path),
        Pixmap::Color(color) => save_color_image(color, path),
    }
}
