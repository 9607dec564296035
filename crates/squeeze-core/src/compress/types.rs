//! Inputs, results, and errors of the compression engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, DecodedImage, OriginFormat};
use crate::encode::{EncodeError, OutputFormat};
use crate::render::RenderError;

/// Errors from a compression attempt.
///
/// Render and encode failures are terminal: the engine never retries them.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The image being compressed, as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceImage {
    /// Decoded width in pixels.
    pub width: u32,
    /// Decoded height in pixels.
    pub height: u32,
    pub origin: OriginFormat,
    /// Size of the original file in bytes.
    pub byte_size: u64,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, origin: OriginFormat, byte_size: u64) -> Self {
        Self {
            width,
            height,
            origin,
            byte_size,
        }
    }

    pub fn from_decoded(image: &DecodedImage, origin: OriginFormat, byte_size: u64) -> Self {
        Self::new(image.width, image.height, origin, byte_size)
    }
}

/// Which step of the search produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Original bytes returned untouched.
    PassThrough,
    /// Largest PNG scale that fit.
    LosslessScale,
    /// Full-size JPEG at quality 1.0 already fit.
    LossyFullQuality,
    /// Highest JPEG quality that fit under the margin.
    LossyQuality,
    /// First reduced-size JPEG that fit.
    DimensionFallback,
    /// Unchecked half-size, half-quality JPEG.
    LastResort,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::PassThrough => "passThrough",
            Strategy::LosslessScale => "losslessScale",
            Strategy::LossyFullQuality => "lossyFullQuality",
            Strategy::LossyQuality => "lossyQuality",
            Strategy::DimensionFallback => "dimensionFallback",
            Strategy::LastResort => "lastResort",
        }
    }
}

/// One render+encode attempt made during the search.
///
/// Only metadata is kept; the candidate's pixels and bytes are dropped as
/// soon as the attempt is rejected or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    pub strategy: Strategy,
    /// Scale relative to the source dimensions.
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    /// Lossy quality; `None` for PNG.
    pub quality: Option<f32>,
    /// Encoded size in bytes.
    pub size: u64,
    /// Whether the size satisfied the ceiling in force for this probe.
    pub accepted: bool,
}

/// The engine's output: one encoded buffer the caller owns outright.
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    /// Output width in pixels. Zero when a pass-through file's header
    /// could not be read.
    pub width: u32,
    /// Output height in pixels. Zero when a pass-through file's header
    /// could not be read.
    pub height: u32,
    pub strategy: Strategy,
    /// Lossy quality of the returned encode, if any.
    pub quality: Option<f32>,
    /// Every probe made, in order.
    pub probes: Vec<Probe>,
}

impl Compressed {
    /// Wrap the original file unchanged.
    ///
    /// PNG originals keep their format tag; everything else is tagged lossy.
    pub fn pass_through(original: &[u8], origin: OriginFormat, width: u32, height: u32) -> Self {
        let format = match origin {
            OriginFormat::Png => OutputFormat::Png,
            OriginFormat::Jpeg | OriginFormat::Other => OutputFormat::Jpeg,
        };
        Self {
            bytes: original.to_vec(),
            format,
            width,
            height,
            strategy: Strategy::PassThrough,
            quality: None,
            probes: Vec::new(),
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn passed_through(&self) -> bool {
        self.strategy == Strategy::PassThrough
    }

    pub fn fits(&self, budget_bytes: u64) -> bool {
        self.size() < budget_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_format_tag() {
        let png = Compressed::pass_through(&[1, 2, 3], OriginFormat::Png, 4, 4);
        assert_eq!(png.format, OutputFormat::Png);
        assert_eq!(png.extension(), "png");

        let jpeg = Compressed::pass_through(&[1, 2, 3], OriginFormat::Jpeg, 4, 4);
        assert_eq!(jpeg.format, OutputFormat::Jpeg);

        let other = Compressed::pass_through(&[1, 2, 3], OriginFormat::Other, 4, 4);
        assert_eq!(other.format, OutputFormat::Jpeg);
        assert_eq!(other.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_pass_through_keeps_bytes() {
        let original = vec![9u8; 100];
        let result = Compressed::pass_through(&original, OriginFormat::Jpeg, 10, 10);
        assert_eq!(result.bytes, original);
        assert_eq!(result.size(), 100);
        assert!(result.passed_through());
        assert!(result.probes.is_empty());
        assert!(result.fits(101));
        assert!(!result.fits(100));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::PassThrough.as_str(), "passThrough");
        assert_eq!(Strategy::LossyQuality.as_str(), "lossyQuality");
        assert_eq!(Strategy::LastResort.as_str(), "lastResort");
    }

    #[test]
    fn test_compress_error_from() {
        let err: CompressError = RenderError::InvalidDimensions {
            width: 0,
            height: 1,
        }
        .into();
        assert!(matches!(err, CompressError::Render(_)));
        assert!(err.to_string().starts_with("Render failed:"));
    }
}
