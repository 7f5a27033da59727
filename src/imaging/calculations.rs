//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::error::ImagingError;
use super::params::{Bounds, Dimensions, MAX_DIMENSION};

/// Outcome of fitting source dimensions into [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub dimensions: Dimensions,
    /// `true` iff `dimensions` differs from the source.
    pub resized: bool,
}

/// Round half up: add 0.5, then truncate.
///
/// Both aspect-ratio branches go through here so ties resolve identically.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Derive the raw target for non-empty bounds, before the no-enlarge and
/// range checks.
fn derive_target(source: Dimensions, bounds: Bounds) -> (i64, i64) {
    let Bounds {
        max_width,
        max_height,
    } = bounds;

    if max_width == 0 {
        // Height given: width follows the source aspect ratio
        let aspect = source.width as f64 / source.height as f64;
        (round_half_up(max_height as f64 * aspect), max_height as i64)
    } else if max_height == 0 {
        // Width given: height follows the inverse aspect ratio
        let aspect = source.height as f64 / source.width as f64;
        (max_width as i64, round_half_up(max_width as f64 * aspect))
    } else {
        let source_aspect = source.aspect_ratio();
        let bounds_aspect = max_width as f64 / max_height as f64;

        if source_aspect > bounds_aspect {
            // Source is relatively wider: width hits the box edge
            (
                max_width as i64,
                round_half_up(max_width as f64 / source_aspect),
            )
        } else {
            // Source is relatively taller (or equal): height hits the box edge
            (
                round_half_up(max_height as f64 * source_aspect),
                max_height as i64,
            )
        }
    }
}

/// Fit `source` within `bounds`, preserving aspect ratio.
///
/// - Both bound axes zero → the source, unchanged.
/// - One axis nonzero → that axis is taken as-is, the other follows the
///   source aspect ratio.
/// - Both nonzero → the result fits inside the box and touches at least one
///   edge.
///
/// With `no_enlarge`, a target larger than the source on *either* axis is
/// discarded in favour of the source dimensions on *both* axes.
///
/// # Errors
///
/// [`ImagingError::InvalidTargetDimensions`] if an axis rounds to zero, and
/// [`ImagingError::TargetTooLarge`] if an axis exceeds [`MAX_DIMENSION`].
///
/// # Examples
/// ```
/// # use imgr::imaging::{fit_within, Bounds, Dimensions};
/// let fit = fit_within(Dimensions::new(1920, 1080), Bounds::new(800, 0).unwrap(), false).unwrap();
/// assert_eq!(fit.dimensions, Dimensions::new(800, 450));
/// assert!(fit.resized);
/// ```
pub fn fit_within(source: Dimensions, bounds: Bounds, no_enlarge: bool) -> Result<Fit, ImagingError> {
    if bounds.is_unconstrained() {
        return Ok(Fit {
            dimensions: source,
            resized: false,
        });
    }

    let (mut width, mut height) = derive_target(source, bounds);

    if no_enlarge && (width > source.width as i64 || height > source.height as i64) {
        width = source.width as i64;
        height = source.height as i64;
    }

    if width <= 0 || height <= 0 {
        return Err(ImagingError::InvalidTargetDimensions { width, height });
    }
    let limit = MAX_DIMENSION as i64;
    if width > limit || height > limit {
        return Err(ImagingError::TargetTooLarge { width, height });
    }

    let dimensions = Dimensions::new(width as u32, height as u32);
    Ok(Fit {
        dimensions,
        resized: dimensions != source,
    })
}
