//! Image decoding WASM bindings.
//!
//! This module exposes PNG decoding and PBI inspection to JavaScript.
//!
//! # Functions
//!
//! - [`decode_png`] - Decode a PNG image to RGBA pixels
//! - [`inspect_pbi`] - Parse a PBI blob and describe its header and palette
//!
//! # Example
//!
//! ```typescript
//! import { decode_png, inspect_pbi } from '@pbigen/wasm';
//!
//! const image = decode_png(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Decoded ${image.width}x${image.height}`);
//!
//! const info = inspect_pbi(pbiBytes);
//! console.log(info.format, info.palette.length);
//! ```

use crate::types::JsPixelBuffer;
use pbigen_core::color::{ColorKey, Rgba};
use pbigen_core::decode;
use pbigen_core::encode::EncodingFormat;
use pbigen_core::reader::PbiImage;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Header and palette summary of a PBI blob, as handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PbiSummary {
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
    pub row_stride: u32,
    pub transparent: bool,
    pub compressed: bool,
    pub color_key: Option<ColorKey>,
    pub palette: Vec<Rgba>,
}

impl PbiSummary {
    fn from_image(image: &PbiImage) -> Self {
        let header = image.header();
        Self {
            format: header.format,
            width: header.width,
            height: header.height,
            row_stride: header.row_stride,
            transparent: header.is_transparent(),
            compressed: header.is_compressed(),
            color_key: header.color_key(),
            palette: image.palette().to_vec(),
        }
    }
}

/// Decode a PNG image from bytes into RGBA pixels.
///
/// # Errors
///
/// Returns an error if the bytes are not a PNG or the PNG is corrupted.
#[wasm_bindgen]
pub fn decode_png(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_png(bytes)
        .map(|buffer| JsPixelBuffer::from_buffer(&buffer))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a PBI blob and return its header summary and palette.
#[wasm_bindgen]
pub fn inspect_pbi(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let image = PbiImage::parse(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&PbiSummary::from_image(&image))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Note: the bindings themselves return `Result<T, JsValue>`, which can only
/// be exercised on wasm32. Native tests cover the conversions underneath.
#[cfg(test)]
mod tests {
    use super::*;
    use pbigen_core::buffer::PixelBuffer;
    use pbigen_core::color::{BLACK, WHITE};
    use pbigen_core::encode::encode;

    #[test]
    fn test_summary_from_keyed_image() {
        let buffer = PixelBuffer::from_rgba(2, 1, vec![BLACK, Rgba::rgb(0, 0, 255)]).unwrap();
        let blob = encode(&buffer, EncodingFormat::Indexed4, Some("WHITE")).unwrap();
        let summary = PbiSummary::from_image(&PbiImage::parse(&blob).unwrap());

        assert_eq!(summary.format, EncodingFormat::Indexed4);
        assert_eq!(summary.row_stride, 1);
        assert!(summary.transparent);
        assert!(!summary.compressed);
        assert_eq!(summary.color_key, Some(ColorKey::White));
        assert_eq!(summary.palette, vec![WHITE, BLACK, Rgba::rgb(0, 0, 255)]);
    }

    #[test]
    fn test_summary_from_mono_image() {
        let buffer = PixelBuffer::from_mono(9, 2, vec![true; 18]).unwrap();
        let blob = encode(&buffer, EncodingFormat::Monochrome, None).unwrap();
        let summary = PbiSummary::from_image(&PbiImage::parse(&blob).unwrap());

        assert_eq!(summary.row_stride, 2);
        assert_eq!(summary.color_key, None);
        assert!(summary.palette.is_empty());
    }
}
