//! Compress-to-size WASM bindings.

use crate::types::{codec_from_str, JsRasterImage, JsSizeSearchResult};
use imgfit_core::{export, SearchOptions};
use wasm_bindgen::prelude::*;

/// Compress an image toward `target_kb` kilobytes (1 KB = 1024 bytes).
///
/// The image keeps its full resolution; only the quality changes. When the
/// target cannot be reached the closest encode is still returned and
/// `met_target` is false.
///
/// `options` is an optional object
/// `{ maxIterations, toleranceRatio, minQuality, maxQuality, measure }` where
/// `measure` is `"encodedBytes"` (default) or `"dataUrlLength"`.
///
/// # Example
///
/// ```typescript
/// const search = compress_to_size(image, 150, 'image/jpeg');
/// if (!search.met_target) {
///   showWarning(`Closest achievable: ${search.result().size_bytes} bytes`);
/// }
/// ```
#[wasm_bindgen]
pub fn compress_to_size(
    image: &JsRasterImage,
    target_kb: f64,
    format: &str,
    options: JsValue,
) -> Result<JsSizeSearchResult, JsValue> {
    let codec = codec_from_str(format).map_err(|e| JsValue::from_str(&e))?;
    let options: SearchOptions = if options.is_undefined() || options.is_null() {
        SearchOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    export::compress_to_size(image.as_core(), target_kb, codec, &options)
        .map(JsSizeSearchResult::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
