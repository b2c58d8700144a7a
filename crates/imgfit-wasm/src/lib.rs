//! imgfit WASM - WebAssembly bindings for imgfit
//!
//! This crate exposes the imgfit-core resize and compression functions to
//! the browser page.
//!
//! # Module Structure
//!
//! - `types` - JS wrapper types for images and results
//! - `decode` - Decoding uploaded files
//! - `resize` - Dimension resolution and resize-by-pixels
//! - `encode` - Single and multi-format encoding
//! - `search` - Compress to a target size in kilobytes
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, compress_to_size } from '@imgfit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const result = compress_to_size(image, 200, 'image/jpeg');
//! link.href = result.data_url();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod resize;
mod search;
mod types;

pub use decode::decode_image;
pub use encode::{encode_image, export_formats};
pub use resize::{resize_to_pixels, resolve_dimensions};
pub use search::compress_to_size;
pub use types::{JsEncodeResult, JsRasterImage, JsSizeSearchResult};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
