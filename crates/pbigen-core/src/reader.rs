//! Parsing PBI blobs back into pixels.
//!
//! Used by build tooling to inspect generated resources and to verify that
//! what the encoder wrote is what the firmware decoder will read.

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::Rgba;
use crate::encode::rle::{self, RleError};
use crate::encode::{unpack_row, EncodeError, PbiHeader, HEADER_SIZE};

/// Errors that can occur while reading a PBI blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PbiError {
    #[error("Truncated PBI: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("Unsupported PBI version {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown PBI format tag {0}")]
    UnknownFormat(u8),

    #[error("Unknown PBI flag bits {0:#04x}")]
    UnknownFlags(u8),

    #[error("PBI image of {width}x{height} is too large to address")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("PBI declares an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Row stride mismatch: expected {expected}, header says {actual}")]
    StrideMismatch { expected: u32, actual: u32 },

    #[error("Palette of {size} entries exceeds format limit {limit}")]
    PaletteTooLarge { size: usize, limit: usize },

    #[error("Palette table mismatch: expected {expected} bytes after pixel data, found {actual}")]
    PaletteMismatch { expected: usize, actual: usize },

    #[error("Pixel index {index} out of range for {palette_len} palette entries")]
    IndexOutOfRange { index: u8, palette_len: usize },

    #[error(transparent)]
    Rle(#[from] RleError),

    #[error(transparent)]
    Buffer(#[from] EncodeError),
}

/// A parsed PBI blob with rows expanded to their packed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbiImage {
    header: PbiHeader,
    rows: Vec<u8>,
    palette: Vec<Rgba>,
}

impl PbiImage {
    /// Parse and validate a complete blob.
    pub fn parse(bytes: &[u8]) -> Result<Self, PbiError> {
        let header = PbiHeader::parse(bytes)?;
        let body = &bytes[HEADER_SIZE..];
        let stride = header.row_stride as usize;
        let data_len = header.pixel_data_len()?;

        let (rows, consumed) = if header.is_compressed() {
            // Bounded by the input, not by the declared size
            let mut rows = Vec::with_capacity(data_len.min(body.len()));
            let mut pos = 0;
            for _ in 0..header.height {
                pos += rle::decode_row(&body[pos..], stride, &mut rows)?;
            }
            (rows, pos)
        } else {
            let rows = body.get(..data_len).ok_or(PbiError::Truncated {
                needed: HEADER_SIZE.saturating_add(data_len),
                actual: bytes.len(),
            })?;
            (rows.to_vec(), data_len)
        };

        let table = &body[consumed..];
        let expected = header.palette_size as usize * 4;
        if table.len() != expected {
            return Err(PbiError::PaletteMismatch {
                expected,
                actual: table.len(),
            });
        }
        let palette = table.chunks_exact(4).map(Rgba::from_slice).collect();

        Ok(Self {
            header,
            rows,
            palette,
        })
    }

    pub fn header(&self) -> &PbiHeader {
        &self.header
    }

    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    /// Packed bytes of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.header.row_stride as usize;
        let start = y as usize * stride;
        &self.rows[start..start + stride]
    }

    /// Per-pixel values in row-major order: bits for monochrome, palette
    /// indices otherwise.
    pub fn pixel_values(&self) -> Vec<u8> {
        let bpp = self.header.format.bits_per_pixel();
        let width = self.header.width as usize;
        (0..self.header.height)
            .flat_map(|y| unpack_row(self.row(y), bpp, width))
            .collect()
    }

    /// Rebuild the pixel buffer the blob describes.
    ///
    /// Monochrome blobs yield a one-bit buffer; indexed blobs resolve each
    /// index through the palette.
    pub fn to_pixel_buffer(&self) -> Result<PixelBuffer, PbiError> {
        let values = self.pixel_values();
        let (width, height) = (self.header.width, self.header.height);

        if !self.header.format.is_indexed() {
            let bits = values.into_iter().map(|v| v != 0).collect();
            return Ok(PixelBuffer::from_mono(width, height, bits)?);
        }

        let colors = values
            .into_iter()
            .map(|index| {
                self.palette
                    .get(index as usize)
                    .copied()
                    .ok_or(PbiError::IndexOutOfRange {
                        index,
                        palette_len: self.palette.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PixelBuffer::from_rgba(width, height, colors)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorKey, BLACK, WHITE};
    use crate::encode::{encode, encode_with, Compression, EncodeOptions, EncodingFormat};

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const GREEN: Rgba = Rgba::rgb(0, 255, 0);

    #[test]
    fn test_parse_monochrome() {
        let buf = PixelBuffer::from_mono(3, 2, vec![true, false, true, false, true, false]).unwrap();
        let blob = encode(&buf, EncodingFormat::Monochrome, None).unwrap();
        let image = PbiImage::parse(&blob).unwrap();

        assert_eq!(image.header().width, 3);
        assert!(image.palette().is_empty());
        assert_eq!(image.row(0), &[0b1010_0000]);
        assert_eq!(image.row(1), &[0b0100_0000]);
        assert_eq!(image.to_pixel_buffer().unwrap(), buf);
    }

    #[test]
    fn test_parse_keyed_indexed() {
        let buf = PixelBuffer::from_rgba(2, 1, vec![RED, GREEN]).unwrap();
        let blob = encode(&buf, EncodingFormat::Indexed4, Some("BLACK")).unwrap();
        let image = PbiImage::parse(&blob).unwrap();

        assert_eq!(image.header().color_key(), Some(ColorKey::Black));
        assert_eq!(image.palette(), &[BLACK, RED, GREEN]);
        assert_eq!(image.pixel_values(), vec![1, 2]);
        assert_eq!(image.to_pixel_buffer().unwrap().colors().collect::<Vec<_>>(), vec![RED, GREEN]);
    }

    #[test]
    fn test_parse_compressed() {
        let colors: Vec<Rgba> = (0..40).map(|i| if i < 30 { WHITE } else { RED }).collect();
        let buf = PixelBuffer::from_rgba(20, 2, colors).unwrap();
        let opts = EncodeOptions::new(EncodingFormat::Indexed8).with_compression(Compression::RowRle);
        let blob = encode_with(&buf, &opts).unwrap();
        let image = PbiImage::parse(&blob).unwrap();

        assert!(image.header().is_compressed());
        assert_eq!(image.to_pixel_buffer().unwrap().colors().collect::<Vec<_>>(), buf.colors().collect::<Vec<_>>());
    }

    #[test]
    fn test_truncated_pixel_data() {
        let buf = PixelBuffer::from_mono(16, 4, vec![true; 64]).unwrap();
        let blob = encode(&buf, EncodingFormat::Monochrome, None).unwrap();
        assert_eq!(
            PbiImage::parse(&blob[..blob.len() - 1]),
            Err(PbiError::Truncated {
                needed: HEADER_SIZE + 8,
                actual: HEADER_SIZE + 7
            })
        );
    }

    #[test]
    fn test_palette_length_mismatch() {
        let buf = PixelBuffer::from_rgba(1, 1, vec![RED]).unwrap();
        let mut blob = encode(&buf, EncodingFormat::Indexed2, None).unwrap();
        blob.push(0);
        assert_eq!(
            PbiImage::parse(&blob),
            Err(PbiError::PaletteMismatch {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_truncated_rle_stream() {
        let buf = PixelBuffer::from_mono(64, 2, vec![false; 128]).unwrap();
        let opts = EncodeOptions::new(EncodingFormat::Monochrome).with_compression(Compression::RowRle);
        let blob = encode_with(&buf, &opts).unwrap();
        assert_eq!(
            PbiImage::parse(&blob[..blob.len() - 1]),
            Err(PbiError::Rle(RleError::Truncated))
        );
    }

    fn oversized_header(compressed: bool) -> Vec<u8> {
        let header = PbiHeader::new(EncodingFormat::Indexed8, u32::MAX, u32::MAX, 0, None, compressed);
        let mut out = Vec::new();
        header.write_to(&mut out);
        out
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_compressed_header_is_rejected() {
        assert_eq!(
            PbiImage::parse(&oversized_header(true)),
            Err(PbiError::Rle(RleError::Truncated))
        );

        let mut blob = oversized_header(true);
        blob.extend_from_slice(&[129, 0xAA]);
        assert_eq!(
            PbiImage::parse(&blob),
            Err(PbiError::Rle(RleError::Truncated))
        );
    }

    #[test]
    fn test_oversized_plain_header_is_rejected() {
        assert!(matches!(
            PbiImage::parse(&oversized_header(false)),
            Err(PbiError::Truncated { .. }) | Err(PbiError::ImageTooLarge { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "32")]
    fn test_pixel_data_len_overflow() {
        assert!(matches!(
            PbiImage::parse(&oversized_header(true)),
            Err(PbiError::ImageTooLarge { .. })
        ));

        let header = PbiHeader::new(EncodingFormat::Indexed8, u32::MAX, u32::MAX, 0, None, false);
        assert_eq!(
            header.pixel_data_len(),
            Err(PbiError::ImageTooLarge {
                width: u32::MAX,
                height: u32::MAX
            })
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_data_len_wide_target() {
        let header = PbiHeader::new(EncodingFormat::Indexed8, u32::MAX, 2, 0, None, false);
        assert_eq!(header.pixel_data_len(), Ok(u32::MAX as usize * 2));
    }

    #[test]
    fn test_index_past_palette() {
        let buf = PixelBuffer::from_rgba(2, 1, vec![RED, GREEN]).unwrap();
        let mut blob = encode(&buf, EncodingFormat::Indexed8, None).unwrap();
        blob[HEADER_SIZE + 1] = 9;
        let image = PbiImage::parse(&blob).unwrap();
        assert_eq!(
            image.to_pixel_buffer(),
            Err(PbiError::IndexOutOfRange {
                index: 9,
                palette_len: 2
            })
        );
    }
}
