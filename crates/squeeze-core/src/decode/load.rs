//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes into RGBA, applying EXIF orientation.
///
/// The format is guessed from the content, so the browser-reported MIME type
/// does not need to be trusted here. Orientation is applied so the pixels
/// match what the browser shows in its preview.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format.
/// Returns `DecodeError::CorruptedFile` if the image fails to decode.
/// Returns `DecodeError::InvalidDimensions` if the image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgba = apply_orientation(img, orientation).into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    Ok(DecodedImage::from_rgba_image(rgba))
}

/// Read the displayed dimensions from the header without decoding pixels.
///
/// Dimensions are swapped when the EXIF orientation rotates the image.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if extract_orientation(bytes).swaps_dimensions() {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn encode_fixture(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        match format {
            // JPEG cannot hold alpha
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
                .into_rgb8()
                .write_to(&mut buffer, format)
                .unwrap(),
            _ => img.write_to(&mut buffer, format).unwrap(),
        }
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([200, 100, 50, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let bytes = encode_fixture(&img, ImageFormat::Png);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 3);
        assert_eq!(decoded.pixels.len(), 4 * 3 * 4);
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 0, 0]);
        assert_eq!(decoded.pixels[7], 255);
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let img = RgbaImage::from_pixel(16, 8, Rgba([90, 120, 200, 255]));
        let bytes = encode_fixture(&img, ImageFormat::Jpeg);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
        assert!(decoded.pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let img = RgbaImage::from_pixel(32, 32, Rgba([1, 2, 3, 255]));
        let bytes = encode_fixture(&img, ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_read_dimensions_matches_decode() {
        let img = RgbaImage::from_pixel(40, 25, Rgba([9, 9, 9, 255]));
        let bytes = encode_fixture(&img, ImageFormat::Png);
        assert_eq!(read_dimensions(&bytes).unwrap(), (40, 25));
    }

    #[test]
    fn test_read_dimensions_garbage() {
        assert!(read_dimensions(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let bytes = encode_fixture(&img, ImageFormat::Jpeg);
        assert_eq!(extract_orientation(&bytes), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(6, 4));
        let rotated = apply_orientation(img.clone(), Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (4, 6));

        let flipped = apply_orientation(img, Orientation::FlipVertical);
        assert_eq!((flipped.width(), flipped.height()), (6, 4));
    }
}
