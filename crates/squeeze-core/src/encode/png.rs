//! PNG encoding for the transparency-preserving path.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::EncodeError;
use crate::render::PixelLayout;

/// Encode RGB or RGBA pixel data to PNG bytes.
///
/// PNG has no quality knob; the only way to shrink it is fewer pixels.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * layout.bytes_per_pixel();
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let color_type = match layout {
        PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
        PixelLayout::Rgba8 => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, FilterType::Adaptive)
        .write_image(pixels, width, height, color_type)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_rgba() {
        let pixels = vec![64u8; 20 * 10 * 4];
        let png = encode_png(&pixels, 20, 10, PixelLayout::Rgba8).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_keeps_alpha() {
        let mut pixels = vec![255u8; 4 * 4 * 4];
        pixels[3] = 0;
        let png = encode_png(&pixels, 4, 4, PixelLayout::Rgba8).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.get_pixel(1, 0)[3], 255);
    }

    #[test]
    fn test_encode_png_rgb() {
        let pixels = vec![1u8; 8 * 8 * 3];
        assert!(encode_png(&pixels, 8, 8, PixelLayout::Rgb8).is_ok());
    }

    #[test]
    fn test_encode_png_length_mismatch() {
        // RGB-sized data claimed as RGBA
        let pixels = vec![1u8; 8 * 8 * 3];
        assert!(matches!(
            encode_png(&pixels, 8, 8, PixelLayout::Rgba8),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        assert!(matches!(
            encode_png(&[], 0, 8, PixelLayout::Rgba8),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_fewer_pixels_smaller_png() {
        let noisy = |w: u32, h: u32| -> Vec<u8> {
            (0..w * h * 4).map(|i| ((i * 7919) % 251) as u8).collect()
        };
        let big = encode_png(&noisy(64, 64), 64, 64, PixelLayout::Rgba8).unwrap();
        let small = encode_png(&noisy(32, 32), 32, 32, PixelLayout::Rgba8).unwrap();
        assert!(small.len() < big.len());
    }
}
