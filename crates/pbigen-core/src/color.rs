//! Color values and the reserved transparency keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::luminance;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Opaque white, all channels at maximum.
pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

/// Opaque black, all color channels zero.
pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build from a 4-byte RGBA slice, as produced by `image::RgbaImage`.
    #[inline]
    pub fn from_slice(chunk: &[u8]) -> Self {
        Self::new(chunk[0], chunk[1], chunk[2], chunk[3])
    }

    /// Channels in RGBA byte order.
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether this color reduces to a lit monochrome pixel.
    #[inline]
    pub fn is_lit(self) -> bool {
        luminance::is_lit(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Which reserved color is treated as transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorKey {
    White,
    Black,
}

impl ColorKey {
    /// The reserved color this key designates.
    pub fn color(self) -> Rgba {
        match self {
            ColorKey::White => WHITE,
            ColorKey::Black => BLACK,
        }
    }

    /// Selector name, `"WHITE"` or `"BLACK"`.
    pub fn name(self) -> &'static str {
        match self {
            ColorKey::White => "WHITE",
            ColorKey::Black => "BLACK",
        }
    }

    /// Derive a key from a resource name containing `WHITE` or `BLACK`.
    ///
    /// `WHITE` wins when both appear.
    pub fn from_resource_name(name: &str) -> Option<Self> {
        if name.contains("WHITE") {
            Some(ColorKey::White)
        } else if name.contains("BLACK") {
            Some(ColorKey::Black)
        } else {
            None
        }
    }
}

impl FromStr for ColorKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WHITE" => Ok(ColorKey::White),
            "BLACK" => Ok(ColorKey::Black),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_colors() {
        assert_eq!(WHITE.to_bytes(), [255, 255, 255, 255]);
        assert_eq!(BLACK.to_bytes(), [0, 0, 0, 255]);
        assert!(WHITE.is_lit());
        assert!(!BLACK.is_lit());
    }

    #[test]
    fn test_color_key_parse() {
        assert_eq!("WHITE".parse::<ColorKey>(), Ok(ColorKey::White));
        assert_eq!("BLACK".parse::<ColorKey>(), Ok(ColorKey::Black));
        assert_eq!("white".parse::<ColorKey>(), Err("white".to_string()));
        assert!("GREEN".parse::<ColorKey>().is_err());
    }

    #[test]
    fn test_color_key_from_resource_name() {
        assert_eq!(
            ColorKey::from_resource_name("IMAGE_ICON_WHITE"),
            Some(ColorKey::White)
        );
        assert_eq!(
            ColorKey::from_resource_name("IMAGE_BLACK_BG"),
            Some(ColorKey::Black)
        );
        assert_eq!(ColorKey::from_resource_name("IMAGE_LOGO"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgba::new(0x12, 0xab, 0x00, 0xff).to_string(), "#12ab00ff");
        assert_eq!(ColorKey::Black.to_string(), "BLACK");
    }

    #[test]
    fn test_from_slice_roundtrip() {
        let c = Rgba::from_slice(&[1, 2, 3, 4]);
        assert_eq!(c, Rgba::new(1, 2, 3, 4));
        assert_eq!(c.to_bytes(), [1, 2, 3, 4]);
    }
}
