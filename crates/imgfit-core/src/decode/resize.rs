//! Resampling to exact pixel dimensions.
//!
//! Target dimensions come from [`crate::dimensions::resolve_dimensions`];
//! this module only moves pixels. The input is never modified.

use super::{DecodeError, FilterType, RasterImage};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// source dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgb_view().ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "pixel buffer of {} bytes does not match {}x{}",
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions_is_identity() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_stretch() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 30, 90, FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (30, 90));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(matches!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(DecodeError::InvalidDimensions { width: 0, height: 50 })
        ));
        assert!(matches!(
            resize(&img, 50, 0, FilterType::Bilinear),
            Err(DecodeError::InvalidDimensions { width: 50, height: 0 })
        ));
    }

    #[test]
    fn test_resize_mismatched_buffer_error() {
        let img = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 30],
        };
        let result = resize(&img, 5, 5, FilterType::Nearest);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_resize_leaves_source_untouched() {
        let img = create_test_image(64, 64);
        let before = img.clone();
        let _ = resize(&img, 16, 16, FilterType::Lanczos3).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }
}
