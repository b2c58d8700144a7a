//! WASM-compatible wrapper types.
//!
//! These wrap the core imgfit types and handle the conversion between Rust
//! and JavaScript representations.

use imgfit_core::{Codec, EncodeResult, RasterImage, SizeSearchResult};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data stays in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`, so keep images in WASM between operations where possible.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            inner: RasterImage {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsRasterImage {
    pub(crate) fn from_core(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &RasterImage {
        &self.inner
    }
}

/// Encoded output ready for download.
#[wasm_bindgen]
pub struct JsEncodeResult {
    inner: EncodeResult,
}

#[wasm_bindgen]
impl JsEncodeResult {
    /// Encoded file bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn size_bytes(&self) -> usize {
        self.inner.size_bytes
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.to_string()
    }

    /// File extension without the dot (`jpg`, `png`, `webp`).
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.codec.extension().to_string()
    }

    /// `data:` URL suitable for an anchor's `href` or an `<img>` `src`.
    pub fn data_url(&self) -> String {
        self.inner.to_data_url()
    }

    /// Name for an anchor's `download` attribute, e.g. `resized-image.webp`.
    pub fn file_name(&self, stem: &str) -> String {
        self.inner.file_name(stem)
    }
}

impl JsEncodeResult {
    pub(crate) fn from_core(inner: EncodeResult) -> Self {
        Self { inner }
    }
}

/// Outcome of a compress-to-size request.
#[wasm_bindgen]
pub struct JsSizeSearchResult {
    inner: SizeSearchResult,
}

#[wasm_bindgen]
impl JsSizeSearchResult {
    /// The chosen encode (a copy).
    pub fn result(&self) -> JsEncodeResult {
        JsEncodeResult::from_core(self.inner.best_result.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn best_quality(&self) -> f32 {
        self.inner.best_quality
    }

    #[wasm_bindgen(getter)]
    pub fn iterations(&self) -> u32 {
        self.inner.iterations
    }

    #[wasm_bindgen(getter)]
    pub fn met_target(&self) -> bool {
        self.inner.met_target
    }

    #[wasm_bindgen(getter)]
    pub fn measured_size(&self) -> usize {
        self.inner.measured_size
    }
}

impl JsSizeSearchResult {
    pub(crate) fn from_core(inner: SizeSearchResult) -> Self {
        Self { inner }
    }
}

/// Parse a codec from a MIME type or format name (`image/webp`, `jpg`, ...).
pub(crate) fn codec_from_str(value: &str) -> Result<Codec, String> {
    Codec::parse(value).ok_or_else(|| format!("Unsupported output format: {value}"))
}
