//! Image processing in pure Rust.
//!
//! | Stage | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content sniffing), `avif-parse` + `rav1d` for AVIF |
//! | **Rotate** | [`transform::rotate`] (quarter turns, lossless) |
//! | **Fit** | [`fit_within`] (integer geometry, no pixels) |
//! | **Scale** | `image::imageops::resize` with a bilinear filter |
//! | **Clip** | `DynamicImage::crop_imm` |
//! | **Encode** | `image` encoders, `tiff` for Deflate TIFF |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Validated values describing an operation
//! - **Transform**: Pixel stages that consume and return a `DynamicImage`
//! - **Format**: Output encoder resolution
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions sequencing the stages over a backend

mod avif;
pub mod backend;
mod calculations;
pub mod error;
pub mod format;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod transform;

pub use backend::{BackendError, Decoded, ImageBackend};
pub use calculations::{Fit, fit_within};
pub use error::{ErrorKind, ImagingError, ParameterError};
pub use format::{Encoder, OutputFormat, Resolution};
pub use operations::{ClipParams, TransformParams, clip, identify, transform};
pub use params::{Bounds, ClipRegion, Dimensions, MAX_DIMENSION, Quality, Rotation};
pub use rust_backend::RustBackend;
