//! Pixel transforms: rotate, clip and scale.
//!
//! Each stage takes its input [`DynamicImage`] by value and returns an
//! independently owned image. A stage with nothing to do hands the same
//! buffer back without copying it.

use super::calculations::Fit;
use super::error::ImagingError;
use super::params::{ClipRegion, Dimensions, Rotation};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView};

/// Dimensions of a decoded image.
pub fn dimensions_of(image: &DynamicImage) -> Dimensions {
    let (width, height) = image.dimensions();
    Dimensions::new(width, height)
}

/// Rotate clockwise by `rotation`, keeping the pixel format.
///
/// | Rotation | Output size | Source `(x, y)` lands at |
/// |---|---|---|
/// | 90° | `h × w` | `(h-1-y, x)` |
/// | 180° | `w × h` | `(w-1-x, h-1-y)` |
/// | 270° | `h × w` | `(y, w-1-x)` |
pub fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Cw90 => image.rotate90(),
        Rotation::Cw180 => image.rotate180(),
        Rotation::Cw270 => image.rotate270(),
    }
}

/// Copy the pixels inside `region` into a new image of size
/// `(x2-x1) × (y2-y1)`. Samples (alpha included) are copied verbatim.
///
/// # Errors
///
/// [`ImagingError::RegionOutOfBounds`] if the region extends past the image.
pub fn clip(image: DynamicImage, region: ClipRegion) -> Result<DynamicImage, ImagingError> {
    region.check_within(dimensions_of(&image))?;
    let size = region.dimensions();
    Ok(image.crop_imm(region.x1, region.y1, size.width, size.height))
}

/// Resample to `fit.dimensions` with a bilinear kernel, only when the fit
/// actually changed the size.
///
/// The result is drawn onto a fresh RGBA8 canvas, so every resized image
/// leaves this stage as `ImageRgba8` regardless of the source format.
pub fn scale(image: DynamicImage, fit: Fit) -> DynamicImage {
    if !fit.resized {
        return image;
    }
    let Dimensions { width, height } = fit.dimensions;
    DynamicImage::ImageRgba8(imageops::resize(
        &image.to_rgba8(),
        width,
        height,
        FilterType::Triangle,
    ))
}
