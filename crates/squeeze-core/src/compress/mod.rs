//! Size-budget compression.
//!
//! [`Compressor`] is the decision engine, generic over any [`Rasterizer`]
//! and [`Encoder`]. [`compress_bytes`] wires it to the default [`Canvas`]
//! and [`ImageCodec`] for callers that start from raw file bytes.
//!
//! [`Rasterizer`]: crate::render::Rasterizer
//! [`Encoder`]: crate::encode::Encoder
//! [`Canvas`]: crate::render::Canvas
//! [`ImageCodec`]: crate::encode::ImageCodec

mod config;
mod dimensions;
mod engine;
mod types;

pub use config::{CompressConfig, SearchRange, DEFAULT_BUDGET_BYTES};
pub use dimensions::scaled_dimensions;
pub use engine::Compressor;
pub use types::{CompressError, Compressed, Probe, SourceImage, Strategy};

use crate::decode::{decode_image, read_dimensions, OriginFormat};
use crate::encode::ImageCodec;
use crate::render::Canvas;

/// Compress an image file to fit `config.budget_bytes`.
///
/// The size check runs before any decoding, so files already under the
/// budget come back byte-identical whatever their content. `mime` is the
/// browser-reported type; when it is empty or unfamiliar the format is
/// sniffed from the bytes.
///
/// # Errors
///
/// Returns `CompressError::InvalidConfig` for a bad configuration, and
/// decode, render, or encode errors for oversized inputs that fail along the
/// way.
pub fn compress_bytes(
    bytes: &[u8],
    mime: &str,
    config: &CompressConfig,
) -> Result<Compressed, CompressError> {
    config.validate()?;

    let origin = OriginFormat::detect(mime, bytes);
    let byte_size = bytes.len() as u64;

    if byte_size < config.budget_bytes {
        let (width, height) = read_dimensions(bytes).unwrap_or((0, 0));
        return Ok(Compressed::pass_through(bytes, origin, width, height));
    }

    let decoded = decode_image(bytes)?;
    let source = SourceImage::from_decoded(&decoded, origin, byte_size);
    let canvas = Canvas::with_filter(&decoded, config.filter);

    Compressor::with_config(canvas, ImageCodec::new(), config.clone())?.compress(&source, bytes)
}
