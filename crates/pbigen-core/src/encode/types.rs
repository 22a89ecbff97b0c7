//! Core types for PBI encoding.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building or encoding a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Empty buffer: width ({width}) and height ({height}) must be non-zero")]
    EmptyBuffer { width: u32, height: u32 },

    /// The image uses more distinct colors than the format can index
    #[error("Palette overflow: image uses at least {colors} colors, format allows at most {capacity}")]
    PaletteOverflow { colors: usize, capacity: usize },

    /// A color key was requested with a name other than WHITE or BLACK
    #[error("Invalid color key selector '{0}': expected WHITE or BLACK")]
    InvalidFormatSelector(String),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} values, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A source palette index points past the end of the source palette
    #[error("Source palette index {index} out of range for {palette_len} entries")]
    SourceIndexOutOfRange { index: u8, palette_len: usize },
}

/// Target pixel encoding of a PBI blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingFormat {
    /// One bit per pixel, no palette.
    #[serde(rename = "monochrome")]
    Monochrome,
    /// Two bits per pixel, up to 4 palette entries.
    #[serde(rename = "indexed-2bpp")]
    Indexed2,
    /// Four bits per pixel, up to 16 palette entries.
    #[serde(rename = "indexed-4bpp")]
    Indexed4,
    /// Eight bits per pixel, up to 256 palette entries.
    #[serde(rename = "indexed-8bpp")]
    Indexed8,
}

impl EncodingFormat {
    /// Indexed formats from narrowest to widest.
    pub const INDEXED: [EncodingFormat; 3] = [
        EncodingFormat::Indexed2,
        EncodingFormat::Indexed4,
        EncodingFormat::Indexed8,
    ];

    pub fn bits_per_pixel(self) -> u8 {
        match self {
            EncodingFormat::Monochrome => 1,
            EncodingFormat::Indexed2 => 2,
            EncodingFormat::Indexed4 => 4,
            EncodingFormat::Indexed8 => 8,
        }
    }

    /// Maximum number of distinct colors the format can represent.
    pub fn capacity(self) -> usize {
        1usize << self.bits_per_pixel()
    }

    pub fn is_indexed(self) -> bool {
        self != EncodingFormat::Monochrome
    }

    /// Format tag stored in the PBI header.
    pub fn tag(self) -> u8 {
        match self {
            EncodingFormat::Monochrome => 0,
            EncodingFormat::Indexed2 => 1,
            EncodingFormat::Indexed4 => 2,
            EncodingFormat::Indexed8 => 3,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(EncodingFormat::Monochrome),
            1 => Some(EncodingFormat::Indexed2),
            2 => Some(EncodingFormat::Indexed4),
            3 => Some(EncodingFormat::Indexed8),
            _ => None,
        }
    }

    /// Bytes per packed row: `ceil(width * bpp / 8)`.
    pub fn row_stride(self, width: u32) -> u32 {
        let bits = width as u64 * self.bits_per_pixel() as u64;
        bits.div_ceil(8) as u32
    }

    /// Narrowest indexed format whose palette holds `colors` entries.
    pub fn smallest_indexed(colors: usize) -> Option<Self> {
        Self::INDEXED
            .into_iter()
            .find(|format| colors <= format.capacity())
    }

    pub fn name(self) -> &'static str {
        match self {
            EncodingFormat::Monochrome => "monochrome",
            EncodingFormat::Indexed2 => "indexed-2bpp",
            EncodingFormat::Indexed4 => "indexed-4bpp",
            EncodingFormat::Indexed8 => "indexed-8bpp",
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the target format is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatChoice {
    /// Always encode with this format.
    Fixed(EncodingFormat),
    /// Pick the narrowest indexed format that holds the image's palette.
    SmallestIndexed,
}

impl From<EncodingFormat> for FormatChoice {
    fn from(format: EncodingFormat) -> Self {
        FormatChoice::Fixed(format)
    }
}

/// Optional compression of the packed pixel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compression {
    /// Rows stored verbatim.
    #[default]
    None,
    /// Each row PackBits-compressed independently.
    RowRle,
}

/// Full set of knobs for [`encode_with`](super::encode_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    pub format: FormatChoice,
    /// Color key selector, `"WHITE"` or `"BLACK"`.
    #[serde(default)]
    pub color_key: Option<String>,
    #[serde(default)]
    pub compression: Compression,
}

impl EncodeOptions {
    pub fn new(format: impl Into<FormatChoice>) -> Self {
        Self {
            format: format.into(),
            color_key: None,
            compression: Compression::None,
        }
    }

    pub fn with_color_key(mut self, selector: impl Into<String>) -> Self {
        self.color_key = Some(selector.into());
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_and_capacity() {
        assert_eq!(EncodingFormat::Monochrome.bits_per_pixel(), 1);
        assert_eq!(EncodingFormat::Monochrome.capacity(), 2);
        assert_eq!(EncodingFormat::Indexed2.capacity(), 4);
        assert_eq!(EncodingFormat::Indexed4.capacity(), 16);
        assert_eq!(EncodingFormat::Indexed8.capacity(), 256);
    }

    #[test]
    fn test_row_stride() {
        assert_eq!(EncodingFormat::Monochrome.row_stride(1), 1);
        assert_eq!(EncodingFormat::Monochrome.row_stride(8), 1);
        assert_eq!(EncodingFormat::Monochrome.row_stride(9), 2);
        assert_eq!(EncodingFormat::Indexed2.row_stride(5), 2);
        assert_eq!(EncodingFormat::Indexed4.row_stride(3), 2);
        assert_eq!(EncodingFormat::Indexed8.row_stride(3), 3);
        assert_eq!(EncodingFormat::Indexed8.row_stride(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_tag_roundtrip() {
        for format in [
            EncodingFormat::Monochrome,
            EncodingFormat::Indexed2,
            EncodingFormat::Indexed4,
            EncodingFormat::Indexed8,
        ] {
            assert_eq!(EncodingFormat::from_tag(format.tag()), Some(format));
        }
        assert_eq!(EncodingFormat::from_tag(4), None);
    }

    #[test]
    fn test_smallest_indexed() {
        assert_eq!(EncodingFormat::smallest_indexed(1), Some(EncodingFormat::Indexed2));
        assert_eq!(EncodingFormat::smallest_indexed(4), Some(EncodingFormat::Indexed2));
        assert_eq!(EncodingFormat::smallest_indexed(5), Some(EncodingFormat::Indexed4));
        assert_eq!(EncodingFormat::smallest_indexed(17), Some(EncodingFormat::Indexed8));
        assert_eq!(EncodingFormat::smallest_indexed(257), None);
    }


    #[test]
    fn test_options_builder() {
        let opts = EncodeOptions::new(EncodingFormat::Indexed4)
            .with_color_key("WHITE")
            .with_compression(Compression::RowRle);
        assert_eq!(opts.format, FormatChoice::Fixed(EncodingFormat::Indexed4));
        assert_eq!(opts.color_key.as_deref(), Some("WHITE"));
        assert_eq!(opts.compression, Compression::RowRle);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::PaletteOverflow {
            colors: 17,
            capacity: 16,
        };
        assert_eq!(
            err.to_string(),
            "Palette overflow: image uses at least 17 colors, format allows at most 16"
        );

        let err = EncodeError::InvalidFormatSelector("GREEN".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid color key selector 'GREEN': expected WHITE or BLACK"
        );
    }
}
