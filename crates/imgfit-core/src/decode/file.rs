//! Decoding of uploaded image files with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, Orientation, RasterImage};

/// Decode an uploaded image from bytes, applying EXIF orientation correction.
///
/// The format is detected from the file contents. JPEG, PNG and WebP are
/// supported. Alpha channels are dropped; the result is always RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected.
/// Returns `DecodeError::CorruptedFile` if the data fails to decode.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let (img, format) = read_dynamic(bytes)?;

    // Browsers honour EXIF orientation when drawing uploads; match them.
    let orientation = if format == ImageFormat::Jpeg {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let oriented = apply_orientation(img, orientation);
    Ok(RasterImage::from_rgb_image(oriented.into_rgb8()))
}

fn read_dynamic(bytes: &[u8]) -> Result<(DynamicImage, ImageFormat), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP
    ) {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok((img, format))
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
