//! Shared test utilities: synthetic images and fixture files.
//!
//! Every image is generated in-test so no binary fixtures are checked in.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic images
// =========================================================================

/// RGB gradient: red follows x, green follows y.
pub fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

/// RGBA image where every pixel is distinct (for small sizes), alpha
/// included, so permutations and windows can be checked exactly.
pub fn indexed_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        let i = y * width + x;
        Rgba([(i % 256) as u8, (i / 256 % 256) as u8, x as u8, (255 - (i % 200)) as u8])
    }))
}

// =========================================================================
// Fixture files
// =========================================================================

pub fn write_png(path: &Path, image: &DynamicImage) {
    image.save_with_format(path, ImageFormat::Png).unwrap();
}
