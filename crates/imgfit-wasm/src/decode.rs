//! Image decoding WASM bindings.

use crate::types::JsRasterImage;
use imgfit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded JPEG, PNG or WebP file.
///
/// EXIF orientation is applied so the pixels match what the browser shows in
/// its own preview.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
