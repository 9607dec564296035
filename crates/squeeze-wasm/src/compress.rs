//! Compression WASM bindings.
//!
//! This module exposes the squeeze-core budget compressor to JavaScript.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress file bytes to fit the default 1 MiB budget
//! - [`compress_image_with_config`] - Same, with a custom `CompressConfig` object
//! - [`default_config`] - The default config as a plain JS object
//! - [`is_supported_image`], [`format_bytes`], [`output_file_name`] - UI helpers
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, format_bytes, output_file_name } from '@squeeze/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type);
//! console.log(`${format_bytes(bytes.length, 2)} -> ${format_bytes(result.byte_length, 2)}`);
//!
//! const blob = new Blob([result.bytes], { type: result.mime_type });
//! const name = output_file_name(file.name, result.mime_type);
//! ```

use crate::types::JsCompressedImage;
use squeeze_core::{CompressConfig, CompressError, OutputFormat};
use wasm_bindgen::prelude::*;

/// Compress an image file so it fits under 1 MiB.
///
/// # Arguments
///
/// * `bytes` - The complete file contents
/// * `mime_type` - The browser-reported type (`File.type`); may be empty
///
/// # Errors
///
/// Returns an error string if the file is over budget and cannot be decoded,
/// or if rendering or encoding fails.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], mime_type: &str) -> Result<JsCompressedImage, JsValue> {
    compress_with(bytes, mime_type, &CompressConfig::default()).map_err(to_js_error)
}

/// Compress an image file with a custom configuration.
///
/// `config` is a plain object with camelCase fields (see [`default_config`]).
/// Missing fields take their defaults; `undefined` or `null` uses the
/// defaults entirely.
///
/// ```typescript
/// const result = compress_image_with_config(bytes, file.type, { budgetBytes: 500_000 });
/// ```
#[wasm_bindgen]
pub fn compress_image_with_config(
    bytes: &[u8],
    mime_type: &str,
    config: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let config: CompressConfig = if config.is_undefined() || config.is_null() {
        CompressConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    compress_with(bytes, mime_type, &config).map_err(to_js_error)
}

/// The default compression config as a plain JS object.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CompressConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a MIME type is an image the compressor should accept.
#[wasm_bindgen]
pub fn is_supported_image(mime_type: &str) -> bool {
    squeeze_core::is_supported_mime(mime_type)
}

/// Human-readable byte count, e.g. `1.5 MB`.
///
/// `decimals` above 100 is treated as 100, the most `toFixed` allows.
#[wasm_bindgen]
pub fn format_bytes(bytes: f64, decimals: u32) -> String {
    // JS numbers arrive as f64; negative or NaN sizes clamp to zero
    let bytes = if bytes.is_finite() && bytes > 0.0 {
        bytes as u64
    } else {
        0
    };
    squeeze_core::format_bytes(bytes, decimals as usize)
}

/// Download name for a result: `<stem>_optimized.<ext>`.
///
/// `mime_type` is the result's type; anything other than `image/png` gets
/// a `.jpg` extension.
#[wasm_bindgen]
pub fn output_file_name(original_name: &str, mime_type: &str) -> String {
    squeeze_core::output_file_name(original_name, format_from_mime(mime_type))
}

fn compress_with(
    bytes: &[u8],
    mime_type: &str,
    config: &CompressConfig,
) -> Result<JsCompressedImage, CompressError> {
    log::debug!(
        "compress_image: {} bytes, type {:?}, budget {}",
        bytes.len(),
        mime_type,
        config.budget_bytes
    );
    squeeze_core::compress_bytes(bytes, mime_type, config).map(JsCompressedImage::from_compressed)
}

fn format_from_mime(mime_type: &str) -> OutputFormat {
    if mime_type.trim().eq_ignore_ascii_case(OutputFormat::Png.mime_type()) {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg
    }
}

fn to_js_error(err: CompressError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Tests for compression bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets, so
/// the native tests go through `compress_with` and the plain helpers.
#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Jpeg).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_small_file_passes_through() {
        let bytes = gradient_jpeg(32, 32);
        let result = compress_with(&bytes, "image/jpeg", &CompressConfig::default()).unwrap();

        assert!(result.passed_through());
        assert_eq!(result.encoded(), bytes.as_slice());
        assert_eq!((result.width(), result.height()), (32, 32));
    }

    #[test]
    fn test_custom_budget_compresses() {
        let bytes = gradient_jpeg(256, 256);
        let budget = (bytes.len() / 2) as u64;
        let result =
            compress_with(&bytes, "image/jpeg", &CompressConfig::with_budget(budget)).unwrap();

        assert!(!result.passed_through());
        assert_eq!(result.mime_type(), "image/jpeg");
        assert!((result.byte_length() as u64) < budget || result.strategy() == "lastResort");
        assert_eq!(&result.encoded()[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_undecodable_oversized_input_errors() {
        let bytes = vec![0u8; 4096];
        let result = compress_with(&bytes, "image/png", &CompressConfig::with_budget(1024));
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("image/png"));
        assert!(is_supported_image("image/webp"));
        assert!(!is_supported_image("application/pdf"));
        assert!(!is_supported_image(""));
    }

    #[test]
    fn test_format_bytes_from_js_numbers() {
        assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
        assert_eq!(format_bytes(-5.0, 2), "0 B");
        assert_eq!(format_bytes(f64::NAN, 2), "0 B");
        assert_eq!(format_bytes(1536.0, 4_000_000_000), "1.5 KB");
    }

    #[test]
    fn test_output_file_name_by_mime() {
        assert_eq!(
            output_file_name("cat.webp", "image/png"),
            "cat_optimized.png"
        );
        assert_eq!(
            output_file_name("cat.png", "image/jpeg"),
            "cat_optimized.jpg"
        );
        assert_eq!(output_file_name("cat", ""), "image_optimized.jpg");
    }
}
