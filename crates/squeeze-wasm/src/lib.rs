//! Squeeze WASM - WebAssembly bindings for Squeeze
//!
//! This crate exposes the squeeze-core budget compressor to the browser page
//! that handles uploads, paste events, and downloads.
//!
//! # Module Structure
//!
//! - `compress` - Compression entry points and UI helpers
//! - `types` - The `JsCompressedImage` result wrapper
//! - `logger` - Routes core `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@squeeze/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type);
//! console.log(`${result.strategy}: ${result.width}x${result.height}, ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod logger;
mod types;

// Re-export public types
pub use compress::{
    compress_image, compress_image_with_config, default_config, format_bytes,
    is_supported_image, output_file_name,
};
pub use logger::ConsoleLogger;
pub use types::JsCompressedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(!version().is_empty());
    }
}
