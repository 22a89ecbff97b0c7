//! Palette construction for indexed formats.
//!
//! Colors are assigned indices in the order they are first seen during a
//! row-major scan. A requested color key always occupies slot 0, whether or
//! not the image itself uses that color.

use std::collections::HashMap;

use crate::buffer::PixelBuffer;
use crate::color::{ColorKey, Rgba};

use super::EncodeError;

/// Reserved palette slot for the color key.
pub const KEY_SLOT: usize = 0;

/// Ordered color → index mapping, local to one encode.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: Vec<Rgba>,
    lookup: HashMap<Rgba, usize>,
}

impl ColorMap {
    /// Collect the distinct colors of `buffer`, with `key` reserved at slot 0.
    ///
    /// Scanning stops once the palette holds `limit + 1` entries, which is
    /// enough to report an overflow against a capacity of `limit`.
    pub fn build(buffer: &PixelBuffer, key: Option<ColorKey>, limit: usize) -> Self {
        let mut map = ColorMap::default();
        if let Some(key) = key {
            map.insert(key.color());
        }
        for color in buffer.colors() {
            if map.entries.len() > limit {
                break;
            }
            map.insert(color);
        }
        map
    }

    fn insert(&mut self, color: Rgba) {
        if !self.lookup.contains_key(&color) {
            self.lookup.insert(color, self.entries.len());
            self.entries.push(color);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Palette entries in index order.
    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    /// Fail with `PaletteOverflow` when the palette exceeds `capacity`.
    pub fn ensure_capacity(&self, capacity: usize) -> Result<(), EncodeError> {
        if self.entries.len() > capacity {
            return Err(EncodeError::PaletteOverflow {
                colors: self.entries.len(),
                capacity,
            });
        }
        Ok(())
    }

    /// Palette index of a color that was present when the map was built.
    ///
    /// Only valid after [`ensure_capacity`](Self::ensure_capacity) with a
    /// capacity of at most 256.
    #[inline]
    pub fn index_of(&self, color: Rgba) -> u8 {
        self.lookup[&color] as u8
    }
}
