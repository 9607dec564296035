//! Squeeze Core - Size-budget image compression
//!
//! This crate turns an uploaded or pasted image into a single encoded file
//! that fits under a byte budget (1 MiB by default), preferring lossless
//! downscaling for PNG originals and JPEG quality search otherwise.
//!
//! # Module Structure
//!
//! - `decode` - Decoding to RGBA with EXIF orientation applied
//! - `render` - Scaled rendering onto a transparent or white background
//! - `encode` - PNG and JPEG encoders behind the [`Encoder`] trait
//! - `compress` - The budget search engine and the [`compress_bytes`] entry point
//! - `output` - Display helpers for byte sizes and download names

pub mod compress;
pub mod decode;
pub mod encode;
pub mod output;
pub mod render;

pub use compress::{
    compress_bytes, CompressConfig, CompressError, Compressed, Compressor, Probe, SourceImage,
    Strategy, DEFAULT_BUDGET_BYTES,
};
pub use decode::{decode_image, is_supported_mime, DecodedImage, OriginFormat};
pub use encode::{Encoder, ImageCodec, OutputFormat};
pub use output::{format_bytes, output_file_name};
pub use render::{Background, Canvas, Rasterizer};
