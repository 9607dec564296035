//! WASM-compatible wrapper for compression results.
//!
//! This module provides the JavaScript-facing result type, handling the
//! conversion from the core `Compressed` value to getters JS can read.

use js_sys::Uint8Array;
use squeeze_core::Compressed;
use wasm_bindgen::prelude::*;

/// A compressed image ready to download or upload.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. Calling `bytes` copies them into a
/// fresh `Uint8Array`, so call it once and keep the result. `free()` releases
/// the WASM copy early; otherwise the finalizer does it.
#[wasm_bindgen]
pub struct JsCompressedImage {
    inner: Compressed,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Encoded file bytes as a `Uint8Array` (copied).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Uint8Array {
        Uint8Array::from(self.inner.bytes.as_slice())
    }

    /// MIME type of the encoded bytes (`image/png` or `image/jpeg`)
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// File extension without the dot
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.extension().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Which search step produced the result, e.g. `"lossyQuality"`
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> String {
        self.inner.strategy.as_str().to_string()
    }

    /// JPEG quality in `(0, 1]`, or `undefined` for PNG and pass-through
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f32> {
        self.inner.quality
    }

    /// Number of render+encode attempts made
    #[wasm_bindgen(getter)]
    pub fn probe_count(&self) -> u32 {
        self.inner.probes.len() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// True when the original file was returned untouched
    #[wasm_bindgen(getter)]
    pub fn passed_through(&self) -> bool {
        self.inner.passed_through()
    }

    /// Every probe as an array of plain objects, for debugging the search.
    pub fn probes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.probes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressedImage {
    pub(crate) fn from_compressed(inner: Compressed) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    pub(crate) fn encoded(&self) -> &[u8] {
        &self.inner.bytes
    }
}
