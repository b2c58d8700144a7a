//! Image encoding for imgfit.
//!
//! This module provides functionality for:
//! - The [`Codec`] enum covering JPEG, PNG and WebP output
//! - The [`RasterEncoder`] primitive ("encode raster at quality Q to codec C")
//! - [`EncodeResult`] values that can be downloaded or rendered as `data:` URLs
//!
//! # Architecture
//!
//! Quality is always expressed as a float in `[0, 1]` at this layer and mapped
//! to each codec's native scale by the encoder. PNG ignores it.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::encode::{encode, Codec};
//!
//! let result = encode(&image, Codec::Jpeg, 0.9).unwrap();
//! println!("Encoded {} bytes as {}", result.size_bytes, result.mime_type);
//! ```

mod codec;
mod encoder;
mod types;

pub use codec::Codec;
pub use encoder::{encode, encode_request, encode_with, DefaultEncoder, RasterEncoder};
pub use types::{EncodeError, EncodeRequest, EncodeResult};
