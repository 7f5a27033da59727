//! Output format resolution.
//!
//! Two tables drive the choice of encoder:
//!
//! | Output extension | Encoder |
//! |---|---|
//! | `png` | PNG |
//! | `gif` | GIF |
//! | `jpg`, `jpeg` | JPEG (caller's quality) |
//! | `tif`, `tiff` | TIFF (Deflate) |
//! | `bmp` | BMP |
//!
//! Any other extension (or none) inherits the encoder of the *input* format:
//! `png`, `gif`, `tiff` and `bmp` map to themselves, everything else to JPEG.

use super::params::Quality;
use std::fmt;
use std::path::Path;

/// Formats this tool can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Gif,
    Jpeg,
    Tiff,
    Bmp,
}

impl OutputFormat {
    /// Look up a (case-insensitive, dot-less) file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Encoder to use when the output extension is not recognized.
    pub fn fallback_for(input_format: &str) -> Self {
        match input_format {
            "png" => Self::Png,
            "gif" => Self::Gif,
            "tiff" => Self::Tiff,
            "bmp" => Self::Bmp,
            _ => Self::Jpeg,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete encoder invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    Png,
    Gif,
    Jpeg { quality: Quality },
    /// Always Deflate-compressed.
    Tiff,
    Bmp,
}

impl Encoder {
    pub fn format(self) -> OutputFormat {
        match self {
            Encoder::Png => OutputFormat::Png,
            Encoder::Gif => OutputFormat::Gif,
            Encoder::Jpeg { .. } => OutputFormat::Jpeg,
            Encoder::Tiff => OutputFormat::Tiff,
            Encoder::Bmp => OutputFormat::Bmp,
        }
    }
}

/// Result of resolving an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub encoder: Encoder,
    /// `true` when the extension was unrecognized and the input format decided.
    pub fell_back: bool,
}

/// Pick the encoder for `output`, given the detected `input_format` tag.
pub fn resolve(output: &Path, input_format: &str, quality: Quality) -> Resolution {
    let requested = output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension);

    let (format, fell_back) = match requested {
        Some(format) => (format, false),
        None => (OutputFormat::fallback_for(input_format), true),
    };

    let encoder = match format {
        OutputFormat::Png => Encoder::Png,
        OutputFormat::Gif => Encoder::Gif,
        OutputFormat::Jpeg => Encoder::Jpeg { quality },
        OutputFormat::Tiff => Encoder::Tiff,
        OutputFormat::Bmp => Encoder::Bmp,
    };

    Resolution { encoder, fell_back }
}
