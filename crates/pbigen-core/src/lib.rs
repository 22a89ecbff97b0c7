//! pbigen Core - Bitmap resource encoder
//!
//! This crate converts raster image assets into PBI, the compact bitmap
//! format consumed by the watch firmware's graphics stack. It covers PNG
//! decoding, the bitmap-to-PBI encoder, a PBI reader, and the resource
//! generators that pick an encoding per declared resource and platform.

pub mod buffer;
pub mod color;
pub mod config;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod reader;
pub mod resource;

pub use buffer::{PixelBuffer, PixelData};
pub use color::{ColorKey, Rgba, BLACK, WHITE};
pub use config::{ConfigError, ResourceManifest};
pub use decode::{decode_png, DecodeError};
pub use encode::{
    encode, encode_with, Compression, EncodeError, EncodeOptions, EncodingFormat, FormatChoice,
    HEADER_SIZE,
};
pub use reader::{PbiError, PbiImage};
pub use resource::{
    compile_resources, generate_object, BuildContext, FileSupply, PixelSupply, PlatformPolicy,
    PlatformTable, ResourceDefinition, ResourceError, ResourceKind, ResourceObject,
};
