//! The encode primitive and its default implementation.
//!
//! JPEG and PNG go through the `image` crate's encoders. WebP goes through
//! libwebp (the `webp` crate) because the `image` crate only writes lossless
//! WebP, which would make the quality parameter meaningless.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{Codec, EncodeError, EncodeRequest, EncodeResult};
use crate::decode::{self, FilterType, RasterImage};

/// "Encode raster at quality Q to codec C".
///
/// Implementations must be deterministic for fixed inputs; the size search
/// relies on it. `quality` is in `[0, 1]` and is ignored by lossless codecs.
pub trait RasterEncoder {
    fn encode(&self, image: &RasterImage, codec: Codec, quality: f32)
        -> Result<Vec<u8>, EncodeError>;
}

/// Encoder backed by the `image` crate (JPEG, PNG) and libwebp (WebP).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl RasterEncoder for DefaultEncoder {
    fn encode(
        &self,
        image: &RasterImage,
        codec: Codec,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        validate(image)?;

        let (pixels, width, height) = (image.pixels.as_slice(), image.width, image.height);
        match codec {
            Codec::Jpeg => {
                let mut buffer = Vec::new();
                JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality))
                    .write_image(pixels, width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| failed(codec, e))?;
                Ok(buffer)
            }
            Codec::Png => {
                let mut buffer = Vec::new();
                PngEncoder::new(&mut buffer)
                    .write_image(pixels, width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| failed(codec, e))?;
                Ok(buffer)
            }
            Codec::WebP => webp::Encoder::from_rgb(pixels, width, height)
                .encode_simple(false, webp_quality(quality))
                .map(|memory| memory.to_vec())
                .map_err(|e| failed(codec, format!("{e:?}"))),
        }
    }
}

/// Encode at full resolution with the [`DefaultEncoder`].
pub fn encode(image: &RasterImage, codec: Codec, quality: f32) -> Result<EncodeResult, EncodeError> {
    encode_with(&DefaultEncoder, image, codec, quality)
}

/// Encode at full resolution with a caller-supplied encoder.
pub fn encode_with<E: RasterEncoder + ?Sized>(
    encoder: &E,
    image: &RasterImage,
    codec: Codec,
    quality: f32,
) -> Result<EncodeResult, EncodeError> {
    let bytes = encoder.encode(image, codec, quality)?;
    Ok(EncodeResult::new(bytes, codec))
}

/// Resample to the request's box, then encode at the request's quality.
pub fn encode_request(
    request: &EncodeRequest<'_>,
    filter: FilterType,
) -> Result<EncodeResult, EncodeError> {
    let (width, height) = (request.target_width, request.target_height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    validate(request.image)?;

    let resized = decode::resize(request.image, width, height, filter)
        .map_err(|e| failed(request.codec, e))?;
    encode(&resized, request.codec, request.quality)
}

fn validate(image: &RasterImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

fn normalized(quality: f32) -> f32 {
    if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Map `[0, 1]` to the JPEG encoder's 1-100 scale.
pub(crate) fn jpeg_quality(quality: f32) -> u8 {
    ((normalized(quality) * 100.0).round() as u8).clamp(1, 100)
}

/// Map `[0, 1]` to libwebp's 0-100 scale.
pub(crate) fn webp_quality(quality: f32) -> f32 {
    normalized(quality) * 100.0
}

fn failed(codec: Codec, message: impl ToString) -> EncodeError {
    EncodeError::EncodingFailed {
        codec,
        message: message.to_string(),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
