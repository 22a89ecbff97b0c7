//! PBI encoding WASM bindings.
//!
//! This module exposes the pbigen-core bitmap encoder to JavaScript.
//!
//! # Functions
//!
//! - [`encode_pbi`] - Encode RGBA pixel data to PBI bytes
//! - [`encode_pbi_from_image`] - Encode a JsPixelBuffer to PBI bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_png, encode_pbi, encode_pbi_from_image } from '@pbigen/wasm';
//!
//! // Encode raw pixel data as 4-bit indexed, keyed on white, uncompressed
//! const pbi = encode_pbi(pixels, width, height, 2, "WHITE", false);
//!
//! // Encode a decoded PNG as monochrome with row compression
//! const pbi = encode_pbi_from_image(decode_png(bytes), 0, undefined, true);
//! ```

use crate::types::{format_from_u8, JsPixelBuffer};
use pbigen_core::buffer::PixelBuffer;
use pbigen_core::encode::{self, Compression, EncodeOptions};
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PBI bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - 0 mono, 1 indexed-2, 2 indexed-4, 3 indexed-8
/// * `color_key` - Optional `"WHITE"` or `"BLACK"` transparency key
/// * `compress` - Apply per-row run-length compression
///
/// # Errors
///
/// Returns an error if:
/// - The format code is unknown
/// - Pixel data length doesn't match dimensions
/// - Width or height is zero
/// - The color key is neither WHITE nor BLACK
/// - The image has more colors than the format can index
#[wasm_bindgen]
pub fn encode_pbi(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: u8,
    color_key: Option<String>,
    compress: bool,
) -> Result<Vec<u8>, JsValue> {
    let buffer = PixelBuffer::from_rgba_bytes(width, height, pixels)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode_buffer(&buffer, format, color_key, compress)
}

/// Encode a JsPixelBuffer to PBI bytes.
#[wasm_bindgen]
pub fn encode_pbi_from_image(
    image: &JsPixelBuffer,
    format: u8,
    color_key: Option<String>,
    compress: bool,
) -> Result<Vec<u8>, JsValue> {
    let buffer = image
        .to_buffer()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode_buffer(&buffer, format, color_key, compress)
}

fn encode_buffer(
    buffer: &PixelBuffer,
    format: u8,
    color_key: Option<String>,
    compress: bool,
) -> Result<Vec<u8>, JsValue> {
    let options = build_options(format, color_key, compress).map_err(|e| JsValue::from_str(&e))?;
    encode::encode_with(buffer, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn build_options(
    format: u8,
    color_key: Option<String>,
    compress: bool,
) -> Result<EncodeOptions, String> {
    let format = format_from_u8(format).ok_or_else(|| format!("Unknown format code: {}", format))?;
    let compression = if compress {
        Compression::RowRle
    } else {
        Compression::None
    };

    let mut options = EncodeOptions::new(format).with_compression(compression);
    options.color_key = color_key;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbigen_core::encode::{EncodingFormat, FormatChoice, HEADER_SIZE};

    // Tests that work on all targets

    #[test]
    fn test_build_options() {
        let options = build_options(2, Some("BLACK".to_string()), true).unwrap();
        assert_eq!(options.format, FormatChoice::Fixed(EncodingFormat::Indexed4));
        assert_eq!(options.color_key.as_deref(), Some("BLACK"));
        assert_eq!(options.compression, Compression::RowRle);
    }

    #[test]
    fn test_build_options_unknown_format() {
        assert_eq!(
            build_options(9, None, false).unwrap_err(),
            "Unknown format code: 9"
        );
    }

    #[test]
    fn test_encode_image_matches_core() {
        let img = JsPixelBuffer::new(2, 2, vec![255u8; 2 * 2 * 4]);
        let buffer = img.to_buffer().unwrap();
        let options = build_options(0, None, false).unwrap();

        let pbi = encode::encode_with(&buffer, &options).unwrap();
        assert_eq!(pbi.len(), HEADER_SIZE + 2);
        assert_eq!(&pbi[HEADER_SIZE..], &[0b1100_0000, 0b1100_0000]);
    }
}
