//! Request and result types for encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use super::Codec;
use crate::decode::RasterImage;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec failed
    #[error("{codec:?} encoding failed: {message}")]
    EncodingFailed { codec: Codec, message: String },
}

/// A single encode: resample `image` to the target box, then encode.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub image: &'a RasterImage,
    pub target_width: u32,
    pub target_height: u32,
    pub codec: Codec,
    /// Quality in `[0, 1]`. Ignored for PNG.
    pub quality: f32,
}

/// Encoded output, produced fresh for every encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeResult {
    pub bytes: Vec<u8>,
    pub size_bytes: usize,
    pub codec: Codec,
    pub mime_type: &'static str,
}

impl EncodeResult {
    /// Wrap encoded bytes for `codec`.
    pub fn new(bytes: Vec<u8>, codec: Codec) -> Self {
        Self {
            size_bytes: bytes.len(),
            bytes,
            codec,
            mime_type: codec.mime_type(),
        }
    }

    /// Download file name: `stem` plus the codec's extension.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.codec.extension())
    }

    /// Render as a `data:<mime>;base64,...` URL for download links and previews.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Length of [`Self::to_data_url`] without building the string.
    pub fn data_url_len(&self) -> usize {
        data_url_prefix_len(self.mime_type) + self.size_bytes.div_ceil(3) * 4
    }
}

fn data_url_prefix_len(mime_type: &str) -> usize {
    "data:".len() + mime_type.len() + ";base64,".len()
}
