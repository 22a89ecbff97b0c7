//! Resource generation WASM bindings.
//!
//! A web-based resource compiler hands over one resource definition at a
//! time, together with the PNG bytes it names, and gets the generated PBI
//! blob back.
//!
//! # Example
//!
//! ```typescript
//! import { compile_resource } from '@pbigen/wasm';
//!
//! const pbi = compile_resource(
//!   { name: 'IMAGE_ARROW_WHITE', type: 'png-trans', file: 'arrow.png' },
//!   pngBytes,
//!   'basalt',
//! );
//! ```

use pbigen_core::decode;
use pbigen_core::resource::{
    encode_options, generate_object, pixel_mode, BuildContext, PlatformTable, ResourceDefinition,
    ResourceError,
};
use wasm_bindgen::prelude::*;

/// Generate the PBI blob for one resource on the given platform.
///
/// Uses the built-in platform table. Failures are also reported to the
/// browser console, named by resource.
#[wasm_bindgen]
pub fn compile_resource(
    definition: JsValue,
    png_bytes: &[u8],
    platform: &str,
) -> Result<Vec<u8>, JsValue> {
    let definition: ResourceDefinition = serde_wasm_bindgen::from_value(definition)
        .map_err(|e| JsValue::from_str(&format!("Invalid resource definition: {}", e)))?;

    compile(&definition, png_bytes, platform).map_err(|e| {
        let message = JsValue::from_str(&e.to_string());
        web_sys::console::error_1(&message);
        message
    })
}

fn compile(
    definition: &ResourceDefinition,
    png_bytes: &[u8],
    platform: &str,
) -> Result<Vec<u8>, ResourceError> {
    let table = PlatformTable::builtin();
    let ctx = BuildContext::new(platform, &table);

    let mode = pixel_mode(&encode_options(definition, &ctx)?);
    let buffer = decode::decode_png_as(png_bytes, mode).map_err(|source| ResourceError::Decode {
        name: definition.name.clone(),
        source,
    })?;
    generate_object(definition, &buffer, &ctx).map(|object| object.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbigen_core::decode::DecodeError;
    use pbigen_core::reader::PbiImage;
    use pbigen_core::resource::ResourceKind;
    use pbigen_core::EncodingFormat;

    // 1x1 opaque white RGBA PNG
    const WHITE_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
        0x0F, 0x04, 0x00, 0x09, 0xFB, 0x03, 0xFD, 0xFB, 0x5E, 0x6B, 0x2B, 0x00, 0x00, 0x00, 0x00,
        0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_compile_pbi8_on_color_platform() {
        let def = ResourceDefinition::new("IMAGE_DOT", ResourceKind::Pbi8, "dot.png");
        let blob = compile(&def, WHITE_PNG, "basalt").unwrap();
        let image = PbiImage::parse(&blob).unwrap();

        assert_eq!(image.header().format, EncodingFormat::Indexed8);
        assert_eq!(image.palette().len(), 1);
    }

    #[test]
    fn test_compile_bad_png_names_resource() {
        let def = ResourceDefinition::new("IMAGE_DOT", ResourceKind::Pbi, "dot.png");
        let err = compile(&def, &[1, 2, 3], "aplite").unwrap_err();

        assert_eq!(
            err,
            ResourceError::Decode {
                name: "IMAGE_DOT".to_string(),
                source: DecodeError::InvalidFormat,
            }
        );
    }

    #[test]
    fn test_compile_pbi_is_monochrome() {
        let def = ResourceDefinition::new("IMAGE_DOT", ResourceKind::Pbi, "dot.png");
        let blob = compile(&def, WHITE_PNG, "basalt").unwrap();
        let image = PbiImage::parse(&blob).unwrap();

        assert_eq!(image.header().format, EncodingFormat::Monochrome);
        assert_eq!(image.row(0), &[0b1000_0000]);
    }

    #[test]
    fn test_compile_unknown_platform() {
        let def = ResourceDefinition::new("IMAGE_DOT", ResourceKind::Pbi8, "dot.png");
        let err = compile(&def, WHITE_PNG, "tintin").unwrap_err();
        assert!(matches!(err, ResourceError::UnknownPlatform { .. }));
    }
}
