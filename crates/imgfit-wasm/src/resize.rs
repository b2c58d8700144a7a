//! Resize-by-pixels WASM bindings.
//!
//! Width and height inputs are optional; `undefined` means "not given".
//! An explicit 0 is passed through and rejected as an invalid dimension.

use crate::types::{JsEncodeResult, JsRasterImage};
use imgfit_core::{dimensions, export, ResizeOptions};
use wasm_bindgen::prelude::*;

/// Compute output dimensions without touching pixels, for live form previews.
///
/// Returns `[width, height]`.
#[wasm_bindgen]
pub fn resolve_dimensions(
    native_width: u32,
    native_height: u32,
    width: Option<u32>,
    height: Option<u32>,
    preserve_aspect: bool,
) -> Result<Vec<u32>, JsValue> {
    dimensions::resolve_dimensions(
        native_width,
        native_height,
        width,
        height,
        preserve_aspect,
    )
    .map(|(w, h)| vec![w, h])
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to the requested dimensions and encode it.
///
/// `options` is an optional object `{ preserveAspect, filter, codec, quality }`;
/// missing fields take their defaults (aspect preserved, Lanczos3, JPEG, 0.9).
///
/// # Example
///
/// ```typescript
/// const result = resize_to_pixels(image, 1280, undefined, { codec: 'webp' });
/// download.href = result.data_url();
/// ```
#[wasm_bindgen]
pub fn resize_to_pixels(
    image: &JsRasterImage,
    width: Option<u32>,
    height: Option<u32>,
    options: JsValue,
) -> Result<JsEncodeResult, JsValue> {
    let options: ResizeOptions = if options.is_undefined() || options.is_null() {
        ResizeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    export::resize_to_pixels(
        image.as_core(),
        width,
        height,
        &options,
    )
    .map(JsEncodeResult::from_core)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
