//! Bitmap to PBI encoding pipeline.
//!
//! This module provides functionality for:
//! - Building a first-seen palette, with an optional reserved color key
//! - Packing rows MSB-first at 1, 2, 4 or 8 bits per pixel
//! - Optional per-row PackBits compression
//! - Emitting the fixed PBI header and assembling the blob
//!
//! # Architecture
//!
//! Encoding is a pure function of its inputs. Palettes and row buffers live
//! only for the duration of one call, so independent resources can be
//! encoded on as many threads as the build wants.
//!
//! # Examples
//!
//! ```ignore
//! use pbigen_core::buffer::PixelBuffer;
//! use pbigen_core::encode::{encode, EncodingFormat};
//!
//! let buffer = PixelBuffer::from_mono(144, 168, bits)?;
//! let pbi = encode(&buffer, EncodingFormat::Monochrome, None)?;
//! ```

pub mod header;
mod pack;
mod palette;
mod pbi;
pub mod rle;
mod types;

pub use header::{flags, PbiHeader, HEADER_SIZE, PBI_VERSION};
pub use pack::{pack_row, unpack_row};
pub use palette::{ColorMap, KEY_SLOT};
pub use pbi::{encode, encode_with};
pub use types::{Compression, EncodeError, EncodeOptions, EncodingFormat, FormatChoice};
