//! PNG decoding into pixel buffers.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, PixelMode};
use crate::buffer::PixelBuffer;
use crate::color::Rgba;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode PNG bytes into an RGBA pixel buffer.
///
/// Palette, grayscale and 16-bit PNGs are all expanded to 8-bit RGBA.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a PNG.
/// Returns `DecodeError::CorruptedFile` if the PNG is corrupted.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_png_as(bytes, PixelMode::Rgba)
}

/// Decode PNG bytes into the requested pixel representation.
///
/// `PixelMode::Mono` applies the lit/dark threshold here, so the encoder
/// receives one-bit pixels.
pub fn decode_png_as(bytes: &[u8], mode: PixelMode) -> Result<PixelBuffer, DecodeError> {
    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(DecodeError::InvalidFormat);
    }

    let img = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    to_pixel_buffer(img, mode)
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path, mode: PixelMode) -> Result<PixelBuffer, DecodeError> {
    let bytes =
        fs::read(path).map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_png_as(&bytes, mode)
}

fn to_pixel_buffer(img: DynamicImage, mode: PixelMode) -> Result<PixelBuffer, DecodeError> {
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let colors = rgba.as_raw().chunks_exact(4).map(Rgba::from_slice);

    let buffer = match mode {
        PixelMode::Rgba => PixelBuffer::from_rgba(width, height, colors.collect()),
        PixelMode::Mono => PixelBuffer::from_mono(width, height, colors.map(Rgba::is_lit).collect()),
    };
    buffer.map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}
