//! Default rasterizer backed by the `image` crate's resampling.

use image::{imageops, ImageBuffer, RgbImage, Rgba};

use super::{Background, FilterType, PixelBuffer, PixelLayout, Rasterizer, RenderError};
use crate::decode::DecodedImage;

/// Draws a decoded image at any size, like an offscreen canvas would.
///
/// Each render allocates a fresh buffer; nothing is cached between calls, so
/// dropping a rejected candidate releases its pixels immediately.
#[derive(Debug)]
pub struct Canvas<'a> {
    source: &'a DecodedImage,
    filter: FilterType,
}

impl<'a> Canvas<'a> {
    pub fn new(source: &'a DecodedImage) -> Self {
        Self::with_filter(source, FilterType::default())
    }

    pub fn with_filter(source: &'a DecodedImage, filter: FilterType) -> Self {
        Self { source, filter }
    }
}

impl Rasterizer for Canvas<'_> {
    type Buffer = PixelBuffer;

    fn render(
        &mut self,
        width: u32,
        height: u32,
        background: Background,
    ) -> Result<PixelBuffer, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let invalid_source = RenderError::InvalidSource {
            width: self.source.width,
            height: self.source.height,
        };
        let same_size = (width, height) == (self.source.width, self.source.height);
        let filter = self.filter.to_image_filter();

        let buffer = match background {
            Background::Transparent => {
                let view: ImageBuffer<Rgba<u8>, &[u8]> =
                    self.source.as_rgba_view().ok_or(invalid_source)?;
                let pixels = if same_size {
                    self.source.pixels.clone()
                } else {
                    imageops::resize(&view, width, height, filter).into_raw()
                };
                PixelBuffer {
                    width,
                    height,
                    layout: PixelLayout::Rgba8,
                    pixels,
                }
            }
            Background::White => {
                // Composite before resampling so transparent texels blend as white
                let flat: RgbImage = ImageBuffer::from_raw(
                    self.source.width,
                    self.source.height,
                    flatten_onto_white(&self.source.pixels),
                )
                .ok_or(invalid_source)?;
                let pixels = if same_size {
                    flat.into_raw()
                } else {
                    imageops::resize(&flat, width, height, filter).into_raw()
                };
                PixelBuffer {
                    width,
                    height,
                    layout: PixelLayout::Rgb8,
                    pixels,
                }
            }
        };
        Ok(buffer)
    }
}

/// Composite straight-alpha RGBA pixels over opaque white, dropping alpha.
pub fn flatten_onto_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        let inverse = 255 - alpha;
        for &channel in &px[..3] {
            // Rounded (c * a + 255 * (255 - a)) / 255
            let value = (channel as u32 * alpha + 255 * inverse + 127) / 255;
            rgb.push(value as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        // Gradient with a transparent left column
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(if x == 0 { 0 } else { 255 });
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_render_exact_dimensions() {
        let img = create_test_image(100, 50);
        let mut canvas = Canvas::new(&img);

        let buffer = canvas.render(37, 19, Background::Transparent).unwrap();
        assert_eq!((buffer.width, buffer.height), (37, 19));
        assert_eq!(buffer.layout, PixelLayout::Rgba8);
        assert_eq!(buffer.pixels.len(), 37 * 19 * 4);
    }

    #[test]
    fn test_render_same_size_keeps_pixels() {
        let img = create_test_image(20, 10);
        let mut canvas = Canvas::new(&img);

        let buffer = canvas.render(20, 10, Background::Transparent).unwrap();
        assert_eq!(buffer.pixels, img.pixels);
    }

    #[test]
    fn test_render_white_background_is_rgb() {
        let img = create_test_image(20, 10);
        let mut canvas = Canvas::new(&img);

        let buffer = canvas.render(20, 10, Background::White).unwrap();
        assert_eq!(buffer.layout, PixelLayout::Rgb8);
        assert_eq!(buffer.pixels.len(), 20 * 10 * 3);
        // The fully transparent first pixel becomes pure white
        assert_eq!(&buffer.pixels[0..3], &[255, 255, 255]);
    }

    #[test]
    fn test_downscaled_white_render_blends_transparency_as_white() {
        // Transparent black column beside an opaque red one
        let img = DecodedImage::new(2, 2, vec![
            0, 0, 0, 0, 255, 0, 0, 255, //
            0, 0, 0, 0, 255, 0, 0, 255,
        ]);
        let mut canvas = Canvas::new(&img);

        let buffer = canvas.render(1, 1, Background::White).unwrap();
        let [r, g, b] = [buffer.pixels[0], buffer.pixels[1], buffer.pixels[2]];
        assert!(r >= 250, "red darkened to {r}");
        assert!((120..=135).contains(&g));
        assert!((120..=135).contains(&b));
    }

    #[test]
    fn test_downscaled_white_render_has_no_dark_edges() {
        // Left half transparent black, right half opaque white
        let mut pixels = Vec::with_capacity(16 * 16 * 4);
        for _y in 0..16 {
            for x in 0..16 {
                if x < 8 {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                } else {
                    pixels.extend_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
        let img = DecodedImage::new(16, 16, pixels);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let mut canvas = Canvas::with_filter(&img, filter);
            let buffer = canvas.render(5, 5, Background::White).unwrap();
            assert_eq!(buffer.pixels.len(), 5 * 5 * 3);
            assert!(
                buffer.pixels.iter().all(|&c| c >= 250),
                "{filter:?} darkened a transparent edge"
            );
        }
    }

    #[test]
    fn test_render_zero_dimensions_error() {
        let img = create_test_image(10, 10);
        let mut canvas = Canvas::new(&img);

        assert!(matches!(
            canvas.render(0, 5, Background::White),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(canvas.render(5, 0, Background::Transparent).is_err());
    }

    #[test]
    fn test_render_mismatched_source_error() {
        let broken = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        let mut canvas = Canvas::new(&broken);
        assert!(matches!(
            canvas.render(5, 5, Background::White),
            Err(RenderError::InvalidSource { .. })
        ));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let mut canvas = Canvas::with_filter(&img, filter);
            let buffer = canvas.render(50, 25, Background::White).unwrap();
            assert_eq!((buffer.width, buffer.height), (50, 25));
        }
    }

    #[test]
    fn test_flatten_onto_white() {
        // Opaque pixel unchanged, transparent pixel white, half alpha blended
        let rgba = [10, 20, 30, 255, 0, 0, 0, 0, 0, 0, 0, 128];
        let rgb = flatten_onto_white(&rgba);
        assert_eq!(&rgb[0..3], &[10, 20, 30]);
        assert_eq!(&rgb[3..6], &[255, 255, 255]);
        assert_eq!(&rgb[6..9], &[127, 127, 127]);
    }
}
