//! Image decoding for Squeeze.
//!
//! This module provides functionality for:
//! - Decoding uploaded or pasted images (PNG, JPEG, GIF, WebP, BMP) to RGBA
//! - Applying EXIF orientation so pixels match the browser preview
//! - Classifying the origin format from a MIME type or magic bytes
//!
//! All operations are synchronous and single-threaded within WASM.

mod load;
mod types;

pub use load::{decode_image, read_dimensions};
pub use types::{is_supported_mime, DecodeError, DecodedImage, OriginFormat, Orientation};
