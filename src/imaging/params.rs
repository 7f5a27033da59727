//! Validated value objects for image operations.
//!
//! These types describe *what* to do, not *how* to do it. Each constructor
//! takes the raw integer the CLI parsed (which may be negative or out of
//! range) and either returns a valid value or the [`ParameterError`] naming
//! the violated clause. Once constructed, a value is always valid, so the
//! stages downstream never re-check it.
//!
//! ## Types
//!
//! - [`Dimensions`]: width × height in pixels.
//! - [`Bounds`]: fit-within maximums; `0` on an axis means unconstrained.
//! - [`Quality`]: lossy encoding quality (0–100, default 90).
//! - [`Rotation`]: clockwise quarter turns.
//! - [`ClipRegion`]: `(x1, y1)`–`(x2, y2)` window, origin top-left.

use super::error::{ImagingError, ParameterError};
use serde::Serialize;
use std::fmt;

/// Hard limit on either axis, for both decoded and computed dimensions.
pub const MAX_DIMENSION: u32 = 65535;

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn exceeds_limit(self) -> bool {
        self.width > MAX_DIMENSION || self.height > MAX_DIMENSION
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Maximum width/height for a fit-within resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Bounds {
    pub fn new(max_width: i64, max_height: i64) -> Result<Self, ParameterError> {
        if max_width < 0 {
            return Err(ParameterError::NegativeWidth(max_width));
        }
        if max_height < 0 {
            return Err(ParameterError::NegativeHeight(max_height));
        }
        // Bounds between MAX_DIMENSION and u32::MAX stay legal: a box fit can
        // still land inside the limit when the other axis is the limiting one.
        let max_width =
            u32::try_from(max_width).map_err(|_| ParameterError::WidthOutOfRange(max_width))?;
        let max_height =
            u32::try_from(max_height).map_err(|_| ParameterError::HeightOutOfRange(max_height))?;
        Ok(Self {
            max_width,
            max_height,
        })
    }

    pub fn is_unconstrained(self) -> bool {
        self.max_width == 0 && self.max_height == 0
    }

    pub fn constrains_both(self) -> bool {
        self.max_width > 0 && self.max_height > 0
    }
}

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Result<Self, ParameterError> {
        match u8::try_from(value) {
            Ok(q) if q <= 100 => Ok(Self(q)),
            _ => Err(ParameterError::QualityOutOfRange(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Clockwise rotation by a multiple of 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn from_degrees(degrees: i64) -> Result<Self, ParameterError> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            other => Err(ParameterError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// Whether the rotated image has width and height exchanged.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }

    pub fn apply_to(self, dims: Dimensions) -> Dimensions {
        if self.swaps_axes() {
            Dimensions::new(dims.height, dims.width)
        } else {
            dims
        }
    }
}

/// Rectangular window in source pixel space. `x2`/`y2` are exclusive.
///
/// Construction checks the clauses that do not depend on the image;
/// [`ClipRegion::check_within`] checks the rest once the source is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl ClipRegion {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Result<Self, ParameterError> {
        for (name, value) in [("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)] {
            if value < 0 {
                return Err(ParameterError::NegativeCoordinate { name, value });
            }
        }
        if x2 <= x1 {
            return Err(ParameterError::EmptyWidth { x1, x2 });
        }
        if y2 <= y1 {
            return Err(ParameterError::EmptyHeight { y1, y2 });
        }
        let coordinate = |name: &'static str, value: i64| {
            u32::try_from(value).map_err(|_| ParameterError::CoordinateOutOfRange { name, value })
        };
        Ok(Self {
            x1: coordinate("x1", x1)?,
            y1: coordinate("y1", y1)?,
            x2: coordinate("x2", x2)?,
            y2: coordinate("y2", y2)?,
        })
    }

    /// Size of the extracted image.
    pub fn dimensions(self) -> Dimensions {
        Dimensions::new(self.x2 - self.x1, self.y2 - self.y1)
    }

    /// Fails with the first coordinate that falls outside `source`.
    /// `x1`/`y1` are covered implicitly since they sit below `x2`/`y2`.
    pub fn check_within(self, source: Dimensions) -> Result<(), ImagingError> {
        if self.x2 > source.width {
            return Err(ImagingError::RegionOutOfBounds {
                name: "x2",
                value: self.x2,
                axis: "width",
                limit: source.width,
            });
        }
        if self.y2 > source.height {
            return Err(ImagingError::RegionOutOfBounds {
                name: "y2",
                value: self.y2,
                axis: "height",
                limit: source.height,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ClipRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})-({},{})", self.x1, self.y1, self.x2, self.y2)
    }
}
