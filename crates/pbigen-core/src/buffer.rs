//! Decoded pixel buffers handed to the encoder.

use crate::color::{Rgba, BLACK, WHITE};
use crate::encode::EncodeError;

/// Per-pixel payload of a [`PixelBuffer`], row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// One on/off bit per pixel, already resolved by the decoder.
    Mono(Vec<bool>),
    /// Indices into a source palette.
    Indexed { indices: Vec<u8>, palette: Vec<Rgba> },
    /// Full RGBA samples.
    Rgba(Vec<Rgba>),
}

impl PixelData {
    /// Number of pixels stored.
    pub fn len(&self) -> usize {
        match self {
            PixelData::Mono(bits) => bits.len(),
            PixelData::Indexed { indices, .. } => indices.len(),
            PixelData::Rgba(colors) => colors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values needed for `width * height` pixels of `per_pixel` values each.
///
/// Saturates at `usize::MAX` on overflow, which no slice can match.
fn expected_len(width: u32, height: u32, per_pixel: usize) -> usize {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(per_pixel))
        .unwrap_or(usize::MAX)
}

/// An immutable decoded image.
///
/// Construction checks that the payload matches the dimensions; a buffer
/// with a zero dimension can be built but is rejected by the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: PixelData,
}

impl PixelBuffer {
    /// Create a buffer, validating length and source palette indices.
    pub fn new(width: u32, height: u32, data: PixelData) -> Result<Self, EncodeError> {
        let expected = expected_len(width, height, 1);
        if data.len() != expected {
            return Err(EncodeError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        if let PixelData::Indexed { indices, palette } = &data {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= palette.len()) {
                return Err(EncodeError::SourceIndexOutOfRange {
                    index,
                    palette_len: palette.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, EncodeError> {
        Self::new(width, height, PixelData::Rgba(pixels))
    }

    /// Create an RGBA buffer from interleaved bytes (4 per pixel).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, EncodeError> {
        let expected = expected_len(width, height, 4);
        if bytes.len() != expected {
            return Err(EncodeError::InvalidPixelData {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes.chunks_exact(4).map(Rgba::from_slice).collect();
        Self::from_rgba(width, height, pixels)
    }

    /// Create a one-bit buffer.
    pub fn from_mono(width: u32, height: u32, bits: Vec<bool>) -> Result<Self, EncodeError> {
        Self::new(width, height, PixelData::Mono(bits))
    }

    /// Create a buffer of indices into `palette`.
    pub fn from_indexed(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<Rgba>,
    ) -> Result<Self, EncodeError> {
        Self::new(width, height, PixelData::Indexed { indices, palette })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Color of the pixel at a row-major index.
    ///
    /// Monochrome sources map lit pixels to white and dark ones to black.
    #[inline]
    pub fn color_at(&self, i: usize) -> Rgba {
        match &self.data {
            PixelData::Mono(bits) => {
                if bits[i] {
                    WHITE
                } else {
                    BLACK
                }
            }
            PixelData::Indexed { indices, palette } => palette[indices[i] as usize],
            PixelData::Rgba(colors) => colors[i],
        }
    }

    /// Monochrome bit of the pixel at a row-major index.
    #[inline]
    pub fn bit_at(&self, i: usize) -> bool {
        match &self.data {
            PixelData::Mono(bits) => bits[i],
            _ => self.color_at(i).is_lit(),
        }
    }

    /// Iterate pixel colors in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        (0..self.pixel_count()).map(move |i| self.color_at(i))
    }

    /// Collect one row of pixels through `f`.
    pub(crate) fn row<T>(&self, y: u32, f: impl Fn(&Self, usize) -> T) -> Vec<T> {
        let start = y as usize * self.width as usize;
        (start..start + self.width as usize)
            .map(|i| f(self, i))
            .collect()
    }
}
