//! Image decoding and resampling for imgfit.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG, PNG and WebP files into a [`RasterImage`]
//! - EXIF orientation correction for camera JPEGs
//! - Resampling to exact pixel dimensions
//!
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use imgfit_core::decode::{decode_image, resize, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let half = resize(&image, image.width / 2, image.height / 2, FilterType::Lanczos3).unwrap();
//! ```

mod file;
mod resize;
mod types;

pub use file::decode_image;
pub use resize::resize;
pub use types::{DecodeError, FilterType, Orientation, RasterImage};
