//! High-level image operations.
//!
//! These functions sequence the pipeline stages against a backend:
//!
//! ```text
//! transform:  decode → rotate → fit/scale → resolve format → encode
//! clip:       decode → clip → resolve format → encode
//! identify:   stat → decode
//! ```
//!
//! Parameters arrive already validated (see [`TransformParams::new`] and
//! [`ClipParams::new`]). Every failure is terminal and carries a message
//! tagged with the stage that produced it.

use super::backend::{Decoded, ImageBackend};
use super::calculations::{Fit, fit_within};
use super::error::ImagingError;
use super::format::{self, Resolution};
use super::params::{Bounds, ClipRegion, Dimensions, Quality, Rotation};
use super::transform::{clip as clip_region, dimensions_of, rotate, scale};
use crate::types::{ImageInfo, TransformOutcome};
use image::DynamicImage;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Validated options for [`transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformParams {
    pub bounds: Bounds,
    pub quality: Quality,
    pub rotation: Rotation,
    pub no_enlarge: bool,
}

impl TransformParams {
    /// Validate raw CLI values in the order they are reported: width,
    /// height, quality, rotation.
    pub fn new(
        width: i64,
        height: i64,
        quality: i64,
        rotate: i64,
        no_enlarge: bool,
    ) -> Result<Self> {
        Ok(Self {
            bounds: Bounds::new(width, height)?,
            quality: Quality::new(quality)?,
            rotation: Rotation::from_degrees(rotate)?,
            no_enlarge,
        })
    }
}

/// Validated options for [`clip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipParams {
    pub region: ClipRegion,
    pub quality: Quality,
}

impl ClipParams {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64, quality: i64) -> Result<Self> {
        Ok(Self {
            region: ClipRegion::new(x1, y1, x2, y2)?,
            quality: Quality::new(quality)?,
        })
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_path(path))
}

/// Decode `input` and check its dimensions are within the hard limits.
fn load(backend: &impl ImageBackend, input: &Path) -> Result<(Decoded, Dimensions)> {
    let decoded = backend
        .decode(input)
        .map_err(|source| ImagingError::DecodeFailure {
            path: display_path(input),
            source,
        })?;

    let dims = dimensions_of(&decoded.image);
    if dims.width == 0 || dims.height == 0 {
        return Err(ImagingError::InvalidSourceDimensions {
            path: display_path(input),
            width: dims.width,
            height: dims.height,
        });
    }
    if dims.exceeds_limit() {
        return Err(ImagingError::SourceTooLarge {
            path: display_path(input),
            width: dims.width,
            height: dims.height,
        });
    }

    log::debug!("decoded {} as {} ({})", input.display(), decoded.format, dims);
    Ok((decoded, dims))
}

/// Resolve the encoder for `output` and write `image` to it.
fn save(
    backend: &impl ImageBackend,
    image: &DynamicImage,
    input_format: &str,
    output: &Path,
    quality: Quality,
) -> Result<()> {
    let Resolution { encoder, fell_back } = format::resolve(output, input_format, quality);
    if fell_back {
        log::info!(
            "{} has no writable extension; encoding as {} (input was {})",
            output.display(),
            encoder.format(),
            input_format
        );
    } else {
        log::debug!("encoding {} as {}", output.display(), encoder.format());
    }

    backend
        .encode(image, encoder, output)
        .map_err(|source| ImagingError::EncodeFailure {
            path: display_path(output),
            source,
        })?;

    log::info!("wrote {}", output.display());
    Ok(())
}

/// Build the one-line summary for a transform.
///
/// A resize is reported from the rotated size, which is what the fit used.
fn transform_message(
    name: &str,
    format: &str,
    original: Dimensions,
    oriented: Dimensions,
    fit: Fit,
    params: &TransformParams,
) -> String {
    let mut notes = Vec::new();
    if params.rotation != Rotation::None {
        notes.push(format!("rotated {}°", params.rotation.degrees()));
    }

    if fit.resized {
        let bounds = params.bounds;
        if bounds.constrains_both() {
            notes.push(format!(
                "fit within {}x{}",
                bounds.max_width, bounds.max_height
            ));
        } else {
            notes.push("maintaining aspect ratio".to_string());
        }
        if params.no_enlarge {
            notes.push("no enlargement".to_string());
        }
        format!(
            "Resizing {name} [{format}] from {oriented} to {} ({})",
            fit.dimensions,
            notes.join(", ")
        )
    } else {
        notes.push(if params.bounds.is_unconstrained() {
            "no resize".to_string()
        } else {
            "no resize needed".to_string()
        });
        format!("Converting {name} [{format}] {original} ({})", notes.join(", "))
    }
}

/// Rotate, fit-within resize and re-encode `input` into `output`.
///
/// Rotation runs first, so the bounds apply to the rotated orientation.
/// The scaler is skipped entirely when the fit leaves the size unchanged,
/// which keeps plain conversions pixel-exact.
pub fn transform(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    params: &TransformParams,
) -> Result<TransformOutcome> {
    let (Decoded { image, format }, original) = load(backend, input)?;

    let image = rotate(image, params.rotation);
    let oriented = params.rotation.apply_to(original);

    let fit = fit_within(oriented, params.bounds, params.no_enlarge)?;
    log::debug!(
        "fit {} into {}x{} → {} (resized: {})",
        oriented,
        params.bounds.max_width,
        params.bounds.max_height,
        fit.dimensions,
        fit.resized
    );
    let image = scale(image, fit);

    let message = transform_message(&file_name(input), &format, original, oriented, fit, params);
    save(backend, &image, &format, output, params.quality)?;

    Ok(TransformOutcome {
        input_file: display_path(input),
        output_file: display_path(output),
        format,
        original_size: original,
        final_size: fit.dimensions,
        resized: fit.resized,
        message,
    })
}

/// Extract `params.region` from `input` and encode it into `output`.
pub fn clip(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    params: &ClipParams,
) -> Result<TransformOutcome> {
    let (Decoded { image, format }, original) = load(backend, input)?;

    let region = params.region;
    let image = clip_region(image, region)?;
    let final_size = region.dimensions();

    let message = format!(
        "Clipping {} [{format}] {original} to region {region}, {final_size}",
        file_name(input)
    );
    save(backend, &image, &format, output, params.quality)?;

    Ok(TransformOutcome {
        input_file: display_path(input),
        output_file: display_path(output),
        format,
        original_size: original,
        final_size,
        resized: false,
        message,
    })
}

/// Describe the image at `path` without writing anything.
pub fn identify(backend: &impl ImageBackend, path: &Path) -> Result<ImageInfo> {
    let metadata = std::fs::metadata(path).map_err(|source| ImagingError::Unreadable {
        path: display_path(path),
        source,
    })?;
    if metadata.len() == 0 {
        return Err(ImagingError::EmptyFile {
            path: display_path(path),
        });
    }

    let (Decoded { image, format }, dims) = load(backend, path)?;
    let size = metadata.len();

    Ok(ImageInfo {
        file: file_name(path),
        path: display_path(path),
        format,
        width: dims.width,
        height: dims.height,
        aspect_ratio: dims.aspect_ratio(),
        has_alpha: image.color().has_alpha(),
        color_model: format!("{:?}", image.color()),
        file_size: size,
        file_size_kb: size as f64 / 1024.0,
    })
}
