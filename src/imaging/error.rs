//! Error taxonomy for the imaging core.
//!
//! Every stage validates its own inputs and fails with a variant that names
//! both the offending value and the constraint it violated. Messages are full
//! sentences because they are shown verbatim to users and emitted in the JSON
//! error envelope.

use super::backend::BackendError;
use thiserror::Error;

/// A single violated clause of a user-supplied parameter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Width cannot be negative, but got {0}.")]
    NegativeWidth(i64),
    #[error("Height cannot be negative, but got {0}.")]
    NegativeHeight(i64),
    #[error("Width must be at most {max}, but got {0}.", max = u32::MAX)]
    WidthOutOfRange(i64),
    #[error("Height must be at most {max}, but got {0}.", max = u32::MAX)]
    HeightOutOfRange(i64),
    #[error("Quality must be between 0 and 100, but got {0}.")]
    QualityOutOfRange(i64),
    #[error("Rotation must be one of 0, 90, 180 or 270 degrees, but got {0}.")]
    InvalidRotation(i64),
    #[error("Clip coordinate {name} cannot be negative, but got {value}.")]
    NegativeCoordinate { name: &'static str, value: i64 },
    #[error("Clip coordinate {name} must be at most {max}, but got {value}.", max = u32::MAX)]
    CoordinateOutOfRange { name: &'static str, value: i64 },
    #[error("Invalid clip region: x2 must be greater than x1, but got x1={x1} and x2={x2}.")]
    EmptyWidth { x1: i64, x2: i64 },
    #[error("Invalid clip region: y2 must be greater than y1, but got y1={y1} and y2={y2}.")]
    EmptyHeight { y1: i64, y2: i64 },
}

/// Machine-readable error category, rendered as `kind` in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DecodeFailure,
    InvalidParameter,
    InvalidDimensions,
    RegionOutOfBounds,
    EncodeFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DecodeFailure => "decode_failure",
            ErrorKind::InvalidParameter => "invalid_parameter",
            ErrorKind::InvalidDimensions => "invalid_dimensions",
            ErrorKind::RegionOutOfBounds => "region_out_of_bounds",
            ErrorKind::EncodeFailure => "encode_failure",
        }
    }
}

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error(
        "The image file {path} could not be decoded (possibly corrupt or unsupported format): {source}"
    )]
    DecodeFailure {
        path: String,
        #[source]
        source: BackendError,
    },

    #[error("The file {path} could not be accessed: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The file {path} is empty.")]
    EmptyFile { path: String },

    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),

    #[error("The image {path} has invalid dimensions: {width}x{height}.")]
    InvalidSourceDimensions {
        path: String,
        width: u32,
        height: u32,
    },

    #[error(
        "The image {path} is too large: {width}x{height} (maximum dimension is 65535)."
    )]
    SourceTooLarge {
        path: String,
        width: u32,
        height: u32,
    },

    #[error("Calculated target dimensions are invalid: {width}x{height}.")]
    InvalidTargetDimensions { width: i64, height: i64 },

    #[error("Target dimensions {width}x{height} exceed maximum dimension of 65535.")]
    TargetTooLarge { width: i64, height: i64 },

    #[error(
        "Clip region exceeds the image: {name}={value} is greater than the image {axis} of {limit}."
    )]
    RegionOutOfBounds {
        name: &'static str,
        value: u32,
        axis: &'static str,
        limit: u32,
    },

    #[error("The output file {path} could not be written: {source}")]
    EncodeFailure {
        path: String,
        #[source]
        source: BackendError,
    },
}

impl ImagingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImagingError::DecodeFailure { .. }
            | ImagingError::Unreadable { .. }
            | ImagingError::EmptyFile { .. } => ErrorKind::DecodeFailure,
            ImagingError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            ImagingError::InvalidSourceDimensions { .. }
            | ImagingError::SourceTooLarge { .. }
            | ImagingError::InvalidTargetDimensions { .. }
            | ImagingError::TargetTooLarge { .. } => ErrorKind::InvalidDimensions,
            ImagingError::RegionOutOfBounds { .. } => ErrorKind::RegionOutOfBounds,
            ImagingError::EncodeFailure { .. } => ErrorKind::EncodeFailure,
        }
    }
}
