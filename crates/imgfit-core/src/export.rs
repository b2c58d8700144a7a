//! The user-facing workflows: resize by pixels, compress to a size in
//! kilobytes, and export one image in several formats.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{FilterType, RasterImage};
use crate::dimensions::{resolve_dimensions, DimensionError};
use crate::encode::{encode, encode_request, Codec, EncodeError, EncodeRequest, EncodeResult};
use crate::search::{find_quality_for_size, SearchError, SearchOptions, SizeSearchResult};

/// Bytes per kilobyte, as entered by users.
pub const BYTES_PER_KB: f64 = 1024.0;

/// Quality used for pixel resizes and format exports unless overridden.
pub const DEFAULT_QUALITY: f32 = 0.9;

/// Errors from the export workflows.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Options for [`resize_to_pixels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOptions {
    pub preserve_aspect: bool,
    pub filter: FilterType,
    pub codec: Codec,
    /// Quality in `[0, 1]`. Ignored for PNG.
    pub quality: f32,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            preserve_aspect: true,
            filter: FilterType::Lanczos3,
            codec: Codec::Jpeg,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Resize to the requested pixel dimensions and encode once.
pub fn resize_to_pixels(
    image: &RasterImage,
    requested_width: Option<u32>,
    requested_height: Option<u32>,
    options: &ResizeOptions,
) -> Result<EncodeResult, ExportError> {
    let (target_width, target_height) = resolve_dimensions(
        image.width,
        image.height,
        requested_width,
        requested_height,
        options.preserve_aspect,
    )?;

    let request = EncodeRequest {
        image,
        target_width,
        target_height,
        codec: options.codec,
        quality: options.quality,
    };
    Ok(encode_request(&request, options.filter)?)
}

/// Compress the full-resolution image toward `target_kb` kilobytes.
///
/// # Errors
///
/// `SearchError::InvalidTarget` (wrapped) when `target_kb` is not a positive,
/// finite number.
pub fn compress_to_size(
    image: &RasterImage,
    target_kb: f64,
    codec: Codec,
    options: &SearchOptions,
) -> Result<SizeSearchResult, ExportError> {
    let target_bytes = kb_to_bytes(target_kb).ok_or(SearchError::InvalidTarget)?;
    Ok(find_quality_for_size(image, target_bytes, codec, options)?)
}

/// Encode the same image once per codec, keeping request order and dropping
/// duplicates.
pub fn export_formats(
    image: &RasterImage,
    codecs: &[Codec],
    quality: f32,
) -> Result<Vec<(Codec, EncodeResult)>, ExportError> {
    let mut seen = Vec::with_capacity(codecs.len());
    for &codec in codecs {
        if !seen.contains(&codec) {
            seen.push(codec);
        }
    }

    let mut results = Vec::with_capacity(seen.len());
    for codec in seen {
        results.push((codec, encode(image, codec, quality)?));
    }
    Ok(results)
}

fn kb_to_bytes(target_kb: f64) -> Option<u64> {
    let bytes = (target_kb * BYTES_PER_KB).round();
    if bytes.is_finite() && bytes >= 1.0 && bytes <= u64::MAX as f64 {
        Some(bytes as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width) as u8);
                pixels.push(((y * 255) / height) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_to_pixels_preserves_aspect() {
        let img = gradient(192, 108);
        let result = resize_to_pixels(&img, Some(96), None, &ResizeOptions::default()).unwrap();

        assert_eq!(result.mime_type, "image/jpeg");
        let decoded = decode_image(&result.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (96, 54));
    }

    #[test]
    fn test_resize_to_pixels_fits_box() {
        let img = gradient(80, 60);
        let options = ResizeOptions {
            codec: Codec::Png,
            ..ResizeOptions::default()
        };
        let result = resize_to_pixels(&img, Some(40), Some(40), &options).unwrap();

        let decoded = decode_image(&result.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 30));
    }

    #[test]
    fn test_resize_to_pixels_stretch() {
        let img = gradient(80, 60);
        let options = ResizeOptions {
            preserve_aspect: false,
            codec: Codec::Png,
            ..ResizeOptions::default()
        };
        let result = resize_to_pixels(&img, Some(40), Some(40), &options).unwrap();

        let decoded = decode_image(&result.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 40));
    }

    #[test]
    fn test_resize_to_pixels_invalid_dimension() {
        let img = gradient(80, 60);
        let result = resize_to_pixels(&img, Some(0), None, &ResizeOptions::default());
        assert!(matches!(
            result,
            Err(ExportError::Dimension(DimensionError::InvalidDimension { .. }))
        ));

        let result = resize_to_pixels(&img, Some(40), Some(0), &ResizeOptions::default());
        assert!(matches!(
            result,
            Err(ExportError::Dimension(DimensionError::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_compress_to_size_rejects_bad_targets() {
        let img = gradient(16, 16);
        for kb in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = compress_to_size(&img, kb, Codec::Jpeg, &SearchOptions::default());
            assert!(
                matches!(result, Err(ExportError::Search(SearchError::InvalidTarget))),
                "{kb} should be rejected"
            );
        }
    }

    #[test]
    fn test_compress_to_size_generous_target() {
        // A small gradient at full quality is far below 100 KB
        let img = gradient(64, 64);
        let result = compress_to_size(&img, 100.0, Codec::Jpeg, &SearchOptions::default()).unwrap();

        assert!(result.met_target);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_quality, 1.0);
        assert!(result.best_result.size_bytes < 100 * 1024);
    }

    #[test]
    fn test_compress_to_size_png_single_encode() {
        let img = gradient(32, 32);
        let result = compress_to_size(&img, 1.0, Codec::Png, &SearchOptions::default()).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best_result.mime_type, "image/png");
    }

    #[test]
    fn test_export_formats_dedupes_in_order() {
        let img = gradient(24, 24);
        let results =
            export_formats(&img, &[Codec::WebP, Codec::Jpeg, Codec::WebP], DEFAULT_QUALITY).unwrap();

        let codecs: Vec<Codec> = results.iter().map(|(codec, _)| *codec).collect();
        assert_eq!(codecs, vec![Codec::WebP, Codec::Jpeg]);
        assert_eq!(results[0].1.mime_type, "image/webp");
        assert_eq!(results[1].1.mime_type, "image/jpeg");
    }

    #[test]
    fn test_export_formats_empty() {
        let img = gradient(8, 8);
        assert!(export_formats(&img, &[], DEFAULT_QUALITY).unwrap().is_empty());
    }

    #[test]
    fn test_kb_to_bytes() {
        assert_eq!(kb_to_bytes(100.0), Some(102_400));
        assert_eq!(kb_to_bytes(0.5), Some(512));
        assert_eq!(kb_to_bytes(0.0), None);
        assert_eq!(kb_to_bytes(-1.0), None);
    }
}
