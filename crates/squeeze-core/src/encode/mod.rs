//! Image encoding for Squeeze.
//!
//! This module provides functionality for:
//! - Encoding flattened RGB buffers to JPEG with a `(0, 1]` quality fraction
//! - Encoding RGBA buffers to PNG, preserving transparency
//! - The [`Encoder`] trait the compression engine probes through
//!
//! # Examples
//!
//! ```ignore
//! use squeeze_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 0.9).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod codec;
mod jpeg;
mod png;
mod types;

pub use codec::ImageCodec;
pub use jpeg::{encode_jpeg, quality_to_jpeg_scale};
pub use png::encode_png;
pub use types::{EncodeError, Encoder, OutputFormat};
