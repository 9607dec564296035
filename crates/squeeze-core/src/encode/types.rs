//! Output formats, encoder trait, and encoding errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Lossy quality outside (0, 1]
    #[error("Invalid quality {0}: must be in (0, 1]")]
    InvalidQuality(f32),

    /// The buffer layout cannot be written in the requested format
    #[error("{format} cannot encode {layout} pixels")]
    UnsupportedLayout {
        format: &'static str,
        layout: &'static str,
    },

    /// The underlying codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless, keeps transparency, no quality parameter.
    Png,
    /// Lossy, opaque, quality-controlled.
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// File extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn is_lossless(self) -> bool {
        self == OutputFormat::Png
    }
}

/// Turns a pixel buffer into encoded bytes.
///
/// `quality` is ignored for lossless formats. For lossy formats it must be
/// in `(0, 1]`; `None` means full quality.
pub trait Encoder<B> {
    fn encode(
        &mut self,
        pixels: &B,
        format: OutputFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError>;
}
