//! Resource generation: turning declared bitmap resources into PBI objects.
//!
//! Each resource declares one of three kinds:
//! - `pbi`: always monochrome
//! - `pbi8`: 8-bit indexed on color platforms, monochrome otherwise
//! - `png-trans`: narrowest indexed format, keyed on WHITE or BLACK as
//!   named by the resource itself
//!
//! Resources are generated independently. A failure is reported against
//! the one resource that caused it and never touches the others.

mod platform;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::ColorKey;
use crate::decode::{load_png, DecodeError, PixelMode};
use crate::encode::{
    encode_with, Compression, EncodeError, EncodeOptions, EncodingFormat, FormatChoice,
};

pub use platform::{Platform, PlatformPolicy, PlatformTable, COLOR_TAG};

/// Declared resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "pbi")]
    Pbi,
    #[serde(rename = "pbi8")]
    Pbi8,
    #[serde(rename = "png-trans")]
    PngTrans,
}

impl ResourceKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Pbi => "pbi",
            ResourceKind::Pbi8 => "pbi8",
            ResourceKind::PngTrans => "png-trans",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pbi" => Ok(ResourceKind::Pbi),
            "pbi8" => Ok(ResourceKind::Pbi8),
            "png-trans" => Ok(ResourceKind::PngTrans),
            other => Err(format!("unknown resource type '{}'", other)),
        }
    }
}

/// A bitmap resource as declared in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub file: PathBuf,
    #[serde(default)]
    pub compress: bool,
}

impl ResourceDefinition {
    pub fn new(name: impl Into<String>, kind: ResourceKind, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            file: file.into(),
            compress: false,
        }
    }

    pub fn compressed(mut self) -> Self {
        self.compress = true;
        self
    }
}

/// A generated resource: its name and the encoded blob, unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceObject {
    pub name: String,
    pub data: Vec<u8>,
}

/// Errors raised while generating one resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource {name}: {source}")]
    Encode { name: String, source: EncodeError },

    #[error("resource {name}: {source}")]
    Decode { name: String, source: DecodeError },

    #[error("resource {name}: unknown platform '{platform}'")]
    UnknownPlatform { name: String, platform: String },
}

impl ResourceError {
    /// Name of the resource that failed.
    pub fn resource_name(&self) -> &str {
        match self {
            ResourceError::Encode { name, .. }
            | ResourceError::Decode { name, .. }
            | ResourceError::UnknownPlatform { name, .. } => name,
        }
    }
}

/// Build-wide settings shared by every resource.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub platform: &'a str,
    pub policy: &'a dyn PlatformPolicy,
}

impl<'a> BuildContext<'a> {
    pub fn new(platform: &'a str, policy: &'a dyn PlatformPolicy) -> Self {
        Self { platform, policy }
    }
}

impl fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

/// Source of decoded pixels for declared resources.
pub trait PixelSupply {
    /// Decode the resource's file, resolving to one-bit pixels for `PixelMode::Mono`.
    fn pixels(
        &self,
        definition: &ResourceDefinition,
        mode: PixelMode,
    ) -> Result<PixelBuffer, DecodeError>;
}

/// Reads resource files as PNGs relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSupply {
    root: PathBuf,
}

impl FileSupply {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PixelSupply for FileSupply {
    fn pixels(
        &self,
        definition: &ResourceDefinition,
        mode: PixelMode,
    ) -> Result<PixelBuffer, DecodeError> {
        load_png(&self.root.join(&definition.file), mode)
    }
}

/// Resolve the encoder settings for a resource on the current platform.
pub fn encode_options(
    definition: &ResourceDefinition,
    ctx: &BuildContext<'_>,
) -> Result<EncodeOptions, ResourceError> {
    let options = match definition.kind {
        ResourceKind::Pbi => EncodeOptions::new(EncodingFormat::Monochrome),
        ResourceKind::Pbi8 => {
            let color = ctx.policy.supports_color(ctx.platform).ok_or_else(|| {
                ResourceError::UnknownPlatform {
                    name: definition.name.clone(),
                    platform: ctx.platform.to_string(),
                }
            })?;
            if color {
                EncodeOptions::new(EncodingFormat::Indexed8)
            } else {
                EncodeOptions::new(EncodingFormat::Monochrome)
            }
        }
        ResourceKind::PngTrans => {
            let key = ColorKey::from_resource_name(&definition.name).ok_or_else(|| {
                ResourceError::Encode {
                    name: definition.name.clone(),
                    source: EncodeError::InvalidFormatSelector(definition.name.clone()),
                }
            })?;
            EncodeOptions::new(FormatChoice::SmallestIndexed).with_color_key(key.name())
        }
    };

    let compression = if definition.compress {
        Compression::RowRle
    } else {
        Compression::None
    };
    Ok(options.with_compression(compression))
}

/// How pixels should be decoded for the given encoder settings.
///
/// Monochrome targets get their bits resolved at decode time.
pub fn pixel_mode(options: &EncodeOptions) -> PixelMode {
    match options.format {
        FormatChoice::Fixed(EncodingFormat::Monochrome) => PixelMode::Mono,
        _ => PixelMode::Rgba,
    }
}

/// Encode one resource's pixels into a resource object.
pub fn generate_object(
    definition: &ResourceDefinition,
    buffer: &PixelBuffer,
    ctx: &BuildContext<'_>,
) -> Result<ResourceObject, ResourceError> {
    let options = encode_options(definition, ctx)?;
    encode_object(definition, buffer, &options, ctx)
}

fn encode_object(
    definition: &ResourceDefinition,
    buffer: &PixelBuffer,
    options: &EncodeOptions,
    ctx: &BuildContext<'_>,
) -> Result<ResourceObject, ResourceError> {
    let data = encode_with(buffer, options).map_err(|source| ResourceError::Encode {
        name: definition.name.clone(),
        source,
    })?;

    debug!(
        "generated {} ({}) for {}: {} bytes",
        definition.name,
        definition.kind,
        ctx.platform,
        data.len()
    );

    Ok(ResourceObject {
        name: definition.name.clone(),
        data,
    })
}

/// Generate every resource, one result per definition in input order.
pub fn compile_resources(
    definitions: &[ResourceDefinition],
    supply: &dyn PixelSupply,
    ctx: &BuildContext<'_>,
) -> Vec<Result<ResourceObject, ResourceError>> {
    definitions
        .iter()
        .map(|definition| {
            let result = encode_options(definition, ctx).and_then(|options| {
                let buffer = supply
                    .pixels(definition, pixel_mode(&options))
                    .map_err(|source| ResourceError::Decode {
                        name: definition.name.clone(),
                        source,
                    })?;
                encode_object(definition, &buffer, &options, ctx)
            });

            if let Err(e) = &result {
                warn!("{}", e);
            }
            result
        })
        .collect()
}
