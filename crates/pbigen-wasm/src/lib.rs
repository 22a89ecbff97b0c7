//! pbigen WASM - WebAssembly bindings for pbigen
//!
//! This crate provides WASM bindings to expose the pbigen-core bitmap encoder
//! and resource generators to a JavaScript build tool.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - PNG decoding and PBI inspection bindings
//! - `encode` - PBI encoding bindings
//! - `resource` - Per-resource generation on a named platform
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_png, encode_pbi_from_image } from '@pbigen/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_png(new Uint8Array(await file.arrayBuffer()));
//! const pbi = encode_pbi_from_image(image, 3, undefined, false);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod resource;
mod types;

// Re-export public types
pub use decode::{decode_png, inspect_pbi, PbiSummary};
pub use encode::{encode_pbi, encode_pbi_from_image};
pub use resource::compile_resource;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
