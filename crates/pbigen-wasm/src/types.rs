//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core pbigen types,
//! handling the conversion between Rust and JavaScript data representations.

use pbigen_core::buffer::PixelBuffer;
use pbigen_core::encode::{EncodeError, EncodingFormat};
use wasm_bindgen::prelude::*;

/// A decoded RGBA image wrapper for JavaScript.
///
/// Pixel data is kept in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.colors().flat_map(|c| c.to_bytes()).collect(),
        }
    }

    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, EncodeError> {
        PixelBuffer::from_rgba_bytes(self.width, self.height, &self.pixels)
    }
}

/// Convert a u8 format code to the core EncodingFormat enum.
///
/// Values:
/// - 0 = Monochrome (1 bpp)
/// - 1 = Indexed2 (2 bpp)
/// - 2 = Indexed4 (4 bpp)
/// - 3 = Indexed8 (8 bpp)
///
/// Any other value is rejected.
pub(crate) fn format_from_u8(value: u8) -> Option<EncodingFormat> {
    EncodingFormat::from_tag(value)
}
