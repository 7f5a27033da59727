//! Records handed from the pipeline to the presentation layer.
//!
//! Field names are the JSON keys of `--json` output, so renaming a field is
//! a breaking change for scripts consuming it.

use crate::imaging::Dimensions;
use serde::Serialize;

/// Result of a `transform` or `clip` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformOutcome {
    pub input_file: String,
    pub output_file: String,
    /// Detected input format tag (`jpeg`, `png`, ...).
    pub format: String,
    /// Size as decoded, before any rotation.
    pub original_size: Dimensions,
    /// Size of the image that was encoded.
    pub final_size: Dimensions,
    pub resized: bool,
    /// Human-readable summary line.
    pub message: String,
}

/// Result of an `info` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    /// File name without directories.
    pub file: String,
    /// Path as given on the command line.
    pub path: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub has_alpha: bool,
    /// Sample layout of the decoded buffer, e.g. `Rgb8` or `Rgba16`.
    pub color_model: String,
    #[serde(rename = "file_size_bytes")]
    pub file_size: u64,
    pub file_size_kb: f64,
}
