//! Image decoding for resource generation.
//!
//! This module provides functionality for:
//! - Decoding PNG assets into RGBA pixel buffers
//! - Reducing PNG assets to one bit per pixel for monochrome targets
//! - Loading assets from disk
//!
//! Decoding itself is delegated to the `image` crate; this layer only maps
//! its output onto [`PixelBuffer`](crate::buffer::PixelBuffer).

mod png;
mod types;

#[cfg(test)]
pub(crate) use png::fixtures;
pub use png::{decode_png, decode_png_as, load_png};
pub use types::{DecodeError, PixelMode};
