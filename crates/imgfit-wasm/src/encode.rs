//! Image encoding WASM bindings.
//!
//! Formats are passed as MIME types or names (`image/jpeg`, `png`, `webp`).

use crate::types::{codec_from_str, JsEncodeResult, JsRasterImage};
use imgfit_core::{encode, export};
use wasm_bindgen::prelude::*;

/// Encode an image at full resolution.
///
/// `quality` is in `[0, 1]` and defaults to 0.9. PNG ignores it.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsRasterImage,
    format: &str,
    quality: Option<f32>,
) -> Result<JsEncodeResult, JsValue> {
    let codec = codec_from_str(format).map_err(|e| JsValue::from_str(&e))?;
    encode::encode(
        image.as_core(),
        codec,
        quality.unwrap_or(export::DEFAULT_QUALITY),
    )
    .map(JsEncodeResult::from_core)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image once per requested format, for multi-format downloads.
///
/// `formats` is an array of format strings; duplicates are skipped. Returns an
/// array of `JsEncodeResult` in request order.
///
/// # Example
///
/// ```typescript
/// const results = export_formats(image, ['image/jpeg', 'image/webp'], 0.8);
/// for (const result of results) {
///   addDownloadLink(result.mime_type, result.data_url());
/// }
/// ```
#[wasm_bindgen]
pub fn export_formats(
    image: &JsRasterImage,
    formats: js_sys::Array,
    quality: Option<f32>,
) -> Result<js_sys::Array, JsValue> {
    let mut codecs = Vec::with_capacity(formats.length() as usize);
    for value in formats.iter() {
        let format = value
            .as_string()
            .ok_or_else(|| JsValue::from_str("Formats must be strings"))?;
        codecs.push(codec_from_str(&format).map_err(|e| JsValue::from_str(&e))?);
    }

    let results = export::export_formats(
        image.as_core(),
        &codecs,
        quality.unwrap_or(export::DEFAULT_QUALITY),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(results
        .into_iter()
        .map(|(_, result)| JsValue::from(JsEncodeResult::from_core(result)))
        .collect())
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets; the
/// host tests exercise the core path the bindings wrap.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_from_js_image_creates_valid_jpeg() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10 * 10 * 3]);

        let result = encode::encode(img.as_core(), imgfit_core::Codec::Jpeg, 0.9);
        assert!(result.is_ok());
        assert_eq!(&result.unwrap().bytes[0..2], &[0xFF, 0xD8]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_image_png() {
        let img = JsRasterImage::new(8, 8, vec![0u8; 8 * 8 * 3]);
        let result = encode_image(&img, "image/png", None).unwrap();
        assert_eq!(result.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_encode_image_unknown_format() {
        let img = JsRasterImage::new(8, 8, vec![0u8; 8 * 8 * 3]);
        assert!(encode_image(&img, "image/gif", None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_formats_dedupes() {
        let img = JsRasterImage::new(8, 8, vec![64u8; 8 * 8 * 3]);
        let formats = js_sys::Array::of3(
            &JsValue::from_str("jpeg"),
            &JsValue::from_str("image/webp"),
            &JsValue::from_str("jpg"),
        );
        let results = export_formats(&img, formats, Some(0.8)).unwrap();
        assert_eq!(results.length(), 2);
    }

    #[wasm_bindgen_test]
    fn test_export_formats_rejects_non_strings() {
        let img = JsRasterImage::new(8, 8, vec![64u8; 8 * 8 * 3]);
        let formats = js_sys::Array::of1(&JsValue::from_f64(1.0));
        assert!(export_formats(&img, formats, None).is_err());
    }
}
