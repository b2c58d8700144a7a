//! imgfit Core - image resizing and size-targeted compression
//!
//! This crate provides the core functionality behind the imgfit resizer:
//! decoding uploads, resolving output dimensions, encoding to JPEG, PNG or
//! WebP, and searching for the quality that brings an encode close to a
//! requested file size.
//!
//! Every operation is a free function over caller-owned inputs. Nothing is
//! cached between calls and no global state is kept.

pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod export;
pub mod search;

pub use decode::{decode_image, FilterType, RasterImage};
pub use dimensions::{resolve_dimensions, DimensionError};
pub use encode::{Codec, EncodeError, EncodeRequest, EncodeResult, RasterEncoder};
pub use export::{compress_to_size, export_formats, resize_to_pixels, ExportError, ResizeOptions};
pub use search::{
    find_quality_for_size, find_quality_for_size_with, SearchError, SearchOptions, SizeMeasure,
    SizeSearchResult,
};
