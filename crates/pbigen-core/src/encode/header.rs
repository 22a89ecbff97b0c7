//! Fixed-size PBI header.
//!
//! All multi-byte fields are little-endian:
//!
//! | offset | size | field |
//! |-------:|-----:|-------|
//! | 0  | 2 | version |
//! | 2  | 1 | format tag |
//! | 3  | 1 | flags |
//! | 4  | 4 | width |
//! | 8  | 4 | height |
//! | 12 | 4 | row stride in bytes |
//! | 16 | 2 | palette entries |
//! | 18 | 2 | reserved, zero |

use serde::Serialize;

use crate::color::ColorKey;
use crate::reader::PbiError;

use super::EncodingFormat;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Layout version written by this encoder.
pub const PBI_VERSION: u16 = 1;

/// Header flag bits.
pub mod flags {
    /// A color key was applied.
    pub const TRANSPARENT: u8 = 1 << 0;
    /// Rows are PackBits-compressed.
    pub const RLE: u8 = 1 << 1;
    /// The color key is white rather than black.
    pub const KEY_WHITE: u8 = 1 << 2;

    pub const ALL: u8 = TRANSPARENT | RLE | KEY_WHITE;
}

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PbiHeader {
    pub format: EncodingFormat,
    pub flags: u8,
    pub width: u32,
    pub height: u32,
    pub row_stride: u32,
    pub palette_size: u16,
}

impl PbiHeader {
    /// Header for an image, with flags derived from the key and compression.
    pub fn new(
        format: EncodingFormat,
        width: u32,
        height: u32,
        palette_size: u16,
        color_key: Option<ColorKey>,
        compressed: bool,
    ) -> Self {
        let mut bits = 0;
        if let Some(key) = color_key {
            bits |= flags::TRANSPARENT;
            if key == ColorKey::White {
                bits |= flags::KEY_WHITE;
            }
        }
        if compressed {
            bits |= flags::RLE;
        }

        Self {
            format,
            flags: bits,
            width,
            height,
            row_stride: format.row_stride(width),
            palette_size,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.flags & flags::TRANSPARENT != 0
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & flags::RLE != 0
    }

    /// The reserved color treated as transparent, if any.
    pub fn color_key(&self) -> Option<ColorKey> {
        if !self.is_transparent() {
            None
        } else if self.flags & flags::KEY_WHITE != 0 {
            Some(ColorKey::White)
        } else {
            Some(ColorKey::Black)
        }
    }

    /// Uncompressed size of the pixel rows.
    ///
    /// Fails when the declared dimensions do not fit in memory on this target.
    pub fn pixel_data_len(&self) -> Result<usize, PbiError> {
        (self.row_stride as usize)
            .checked_mul(self.height as usize)
            .ok_or(PbiError::ImageTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&PBI_VERSION.to_le_bytes());
        out.push(self.format.tag());
        out.push(self.flags);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.row_stride.to_le_bytes());
        out.extend_from_slice(&self.palette_size.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
    }

    /// Parse and validate the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, PbiError> {
        let header = bytes.get(..HEADER_SIZE).ok_or(PbiError::Truncated {
            needed: HEADER_SIZE,
            actual: bytes.len(),
        })?;

        let u16_at = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };

        let version = u16_at(0);
        if version != PBI_VERSION {
            return Err(PbiError::UnsupportedVersion(version));
        }

        let format = EncodingFormat::from_tag(header[2]).ok_or(PbiError::UnknownFormat(header[2]))?;

        let flags = header[3];
        if flags & !flags::ALL != 0 {
            return Err(PbiError::UnknownFlags(flags));
        }

        let width = u32_at(4);
        let height = u32_at(8);
        if width == 0 || height == 0 {
            return Err(PbiError::EmptyImage { width, height });
        }

        let row_stride = u32_at(12);
        let expected_stride = format.row_stride(width);
        if row_stride != expected_stride {
            return Err(PbiError::StrideMismatch {
                expected: expected_stride,
                actual: row_stride,
            });
        }

        let palette_size = u16_at(16);
        let palette_limit = if format.is_indexed() {
            format.capacity()
        } else {
            0
        };
        if palette_size as usize > palette_limit {
            return Err(PbiError::PaletteTooLarge {
                size: palette_size as usize,
                limit: palette_limit,
            });
        }

        Ok(Self {
            format,
            flags,
            width,
            height,
            row_stride,
            palette_size,
        })
    }
}
