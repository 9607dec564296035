//! Pixel buffer and rasterizer types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while drawing an image into a pixel buffer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The source image pixels do not match its declared dimensions
    #[error("Source image buffer does not match {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
}

/// What sits behind the source pixels when they are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Keep alpha as-is.
    #[default]
    Transparent,
    /// Composite onto opaque white. Required before lossy encoding, which
    /// would otherwise turn transparent areas black.
    White,
}

/// Filter type for image resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel, no alpha.
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// Intermediate pixels produced by a rasterizer and consumed by an encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    /// Row-major pixel data, `width * height * layout.bytes_per_pixel()` long.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Expected byte length for the buffer's dimensions and layout.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.layout.bytes_per_pixel()
    }
}

/// Draws the source image at arbitrary dimensions.
///
/// Implementations own (or borrow) the decoded source, so a render call only
/// names the target size and background.
pub trait Rasterizer {
    /// Buffer type handed to the encoder.
    type Buffer;

    /// Produce a buffer of exactly `width × height`.
    fn render(
        &mut self,
        width: u32,
        height: u32,
        background: Background,
    ) -> Result<Self::Buffer, RenderError>;
}
