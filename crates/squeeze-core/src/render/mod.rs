//! Rasterizer: draws the source image into an intermediate pixel buffer.
//!
//! The compression engine only talks to the [`Rasterizer`] trait; [`Canvas`]
//! is the default implementation over a [`DecodedImage`](crate::decode::DecodedImage).
//! Rendering onto [`Background::White`] flattens transparency and drops the
//! alpha channel so the result can go straight into a lossy encoder.

mod canvas;
mod types;

pub use canvas::{flatten_onto_white, Canvas};
pub use types::{Background, FilterType, PixelBuffer, PixelLayout, Rasterizer, RenderError};
