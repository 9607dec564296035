//! Default encoder over [`PixelBuffer`]s.

use super::{encode_jpeg, encode_png, EncodeError, Encoder, OutputFormat};
use crate::render::{PixelBuffer, PixelLayout};

/// Encodes rendered buffers with the `image` crate's PNG and JPEG codecs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder<PixelBuffer> for ImageCodec {
    fn encode(
        &mut self,
        buffer: &PixelBuffer,
        format: OutputFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EncodeError> {
        if buffer.pixels.len() != buffer.expected_len() {
            return Err(EncodeError::InvalidPixelData {
                expected: buffer.expected_len(),
                actual: buffer.pixels.len(),
            });
        }

        match format {
            OutputFormat::Png => {
                encode_png(&buffer.pixels, buffer.width, buffer.height, buffer.layout)
            }
            OutputFormat::Jpeg => {
                if buffer.layout != PixelLayout::Rgb8 {
                    return Err(EncodeError::UnsupportedLayout {
                        format: "JPEG",
                        layout: "RGBA",
                    });
                }
                encode_jpeg(
                    &buffer.pixels,
                    buffer.width,
                    buffer.height,
                    quality.unwrap_or(1.0),
                )
            }
        }
    }
}
