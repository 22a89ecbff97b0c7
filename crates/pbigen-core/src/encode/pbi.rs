//! Bitmap to PBI encoding.
//!
//! A PBI blob is the header, then the packed pixel rows in row-major order,
//! then the palette (4 bytes RGBA per entry, index order) for indexed
//! formats. Output depends only on the inputs, so repeated builds of the
//! same asset are byte-identical.

use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::ColorKey;

use super::header::{PbiHeader, HEADER_SIZE};
use super::pack::pack_row;
use super::palette::ColorMap;
use super::rle;
use super::{Compression, EncodeError, EncodeOptions, EncodingFormat, FormatChoice};

/// Encode `buffer` as an uncompressed PBI blob.
///
/// # Arguments
///
/// * `buffer` - Decoded pixels, must be non-empty
/// * `format` - Target pixel format
/// * `color_key` - Optional transparency key selector, `"WHITE"` or `"BLACK"`
///
/// # Errors
///
/// * `EmptyBuffer` if width or height is zero
/// * `InvalidFormatSelector` if `color_key` names neither reserved color
/// * `PaletteOverflow` if the image (plus key) has more colors than `format` allows;
///   `colors` is the count seen when scanning stopped, one past the capacity
pub fn encode(
    buffer: &PixelBuffer,
    format: EncodingFormat,
    color_key: Option<&str>,
) -> Result<Vec<u8>, EncodeError> {
    let mut options = EncodeOptions::new(format);
    options.color_key = color_key.map(str::to_string);
    encode_with(buffer, &options)
}

/// Encode `buffer` with explicit format choice, color key and compression.
///
/// Monochrome output emits `Mono` pixels exactly as given; bits are meant to
/// be resolved upstream, as `decode_png_as(.., PixelMode::Mono)` and the
/// resource generators do. RGBA and source-indexed buffers are still accepted
/// and fall back to the same [`Rgba::is_lit`](crate::color::Rgba::is_lit)
/// rule the decoder applies.
pub fn encode_with(buffer: &PixelBuffer, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (buffer.width(), buffer.height());
    if buffer.is_empty() {
        return Err(EncodeError::EmptyBuffer { width, height });
    }

    let key = options
        .color_key
        .as_deref()
        .map(parse_color_key)
        .transpose()?;

    let (format, palette) = resolve_format(buffer, options.format, key)?;

    let stride = format.row_stride(width) as usize;
    let bpp = format.bits_per_pixel();
    let compressed = options.compression == Compression::RowRle;

    let mut pixel_data = Vec::with_capacity(stride * height as usize);
    let mut packed = Vec::with_capacity(stride);
    for y in 0..height {
        let values = match &palette {
            Some(map) => buffer.row(y, |b, i| map.index_of(b.color_at(i))),
            None => buffer.row(y, |b, i| b.bit_at(i) as u8),
        };

        packed.clear();
        pack_row(&values, bpp, &mut packed);
        debug_assert_eq!(packed.len(), stride);

        if compressed {
            rle::encode_row(&packed, &mut pixel_data);
        } else {
            pixel_data.extend_from_slice(&packed);
        }
    }

    let palette_entries = palette.as_ref().map_or(&[][..], |map| map.entries());
    let header = PbiHeader::new(
        format,
        width,
        height,
        palette_entries.len() as u16,
        key,
        compressed,
    );

    let mut out = Vec::with_capacity(HEADER_SIZE + pixel_data.len() + palette_entries.len() * 4);
    header.write_to(&mut out);
    out.extend_from_slice(&pixel_data);
    for color in palette_entries {
        out.extend_from_slice(&color.to_bytes());
    }

    debug!(
        "encoded {}x{} {} (palette {}, key {:?}, rle {}) -> {} bytes",
        width,
        height,
        format,
        palette_entries.len(),
        key,
        compressed,
        out.len()
    );

    Ok(out)
}

fn parse_color_key(selector: &str) -> Result<ColorKey, EncodeError> {
    selector
        .parse()
        .map_err(EncodeError::InvalidFormatSelector)
}

/// Settle the concrete format and, for indexed formats, the palette.
fn resolve_format(
    buffer: &PixelBuffer,
    choice: FormatChoice,
    key: Option<ColorKey>,
) -> Result<(EncodingFormat, Option<ColorMap>), EncodeError> {
    match choice {
        FormatChoice::Fixed(EncodingFormat::Monochrome) => Ok((EncodingFormat::Monochrome, None)),
        FormatChoice::Fixed(format) => {
            let map = ColorMap::build(buffer, key, format.capacity());
            map.ensure_capacity(format.capacity())?;
            Ok((format, Some(map)))
        }
        FormatChoice::SmallestIndexed => {
            let map = ColorMap::build(buffer, key, EncodingFormat::Indexed8.capacity());
            let format = EncodingFormat::smallest_indexed(map.len()).ok_or(
                EncodeError::PaletteOverflow {
                    colors: map.len(),
                    capacity: EncodingFormat::Indexed8.capacity(),
                },
            )?;
            Ok((format, Some(map)))
        }
    }
}
