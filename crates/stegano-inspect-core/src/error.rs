use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    /// Represents a failure to open or read the inspected file
    #[error("File {path:?} is not readable")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Represents a search pattern that is not a sequence of hex byte pairs, for example `ZZ` or `ABC`
    #[error("Invalid hex pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Represents a pixel coordinate outside of the image dimensions
    #[error("Pixel ({x}, {y}) is outside of the image dimensions {width}x{height}")]
    CoordinateOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Represents bytes that could not be decoded as an image, pixel operations are not possible then
    #[error("Image media is invalid")]
    InvalidImageMedia,
}

impl InspectError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.into(),
        }
    }
}
