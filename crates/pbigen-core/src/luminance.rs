//! Luminance threshold used to reduce color pixels to a single on/off bit.
//!
//! Monochrome PBI output stores one bit per pixel. Sources that arrive as
//! color (RGBA or palette indices) are reduced with a single fixed rule so
//! that the same asset always produces the same bitmap regardless of who
//! invokes the encoder.

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Pixels at or above this luminance (and alpha) are lit.
pub const LIT_THRESHOLD: u8 = 128;

/// Calculate luminance from u8 RGB values (0 to 255).
///
/// # Returns
/// Luminance value (0-255), rounded to nearest.
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Whether an RGBA sample counts as a lit (white) monochrome pixel.
///
/// A pixel is lit when it is at least half opaque and its BT.709
/// luminance reaches [`LIT_THRESHOLD`].
#[inline]
pub fn is_lit(r: u8, g: u8, b: u8, a: u8) -> bool {
    a >= LIT_THRESHOLD && calculate_luminance_u8(r, g, b) >= LIT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(calculate_luminance_u8(255, 255, 255), 255);
        assert_eq!(calculate_luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in [0u8, 64, 128, 192, 255] {
            let lum = calculate_luminance_u8(v, v, v);
            assert!(
                (lum as i32 - v as i32).abs() <= 1,
                "Gray {} should produce luminance ~{}, got {}",
                v,
                v,
                lum
            );
        }
    }

    #[test]
    fn test_primaries() {
        // 0.2126 * 255 ≈ 54.21
        assert!((calculate_luminance_u8(255, 0, 0) as i32 - 54).abs() <= 1);
        // 0.7152 * 255 ≈ 182.38
        assert!((calculate_luminance_u8(0, 255, 0) as i32 - 182).abs() <= 1);
        // 0.0722 * 255 ≈ 18.41
        assert!((calculate_luminance_u8(0, 0, 255) as i32 - 18).abs() <= 1);
    }

    #[test]
    fn test_is_lit() {
        assert!(is_lit(255, 255, 255, 255));
        assert!(!is_lit(0, 0, 0, 255));
        // Green is bright, red and blue are not
        assert!(is_lit(0, 255, 0, 255));
        assert!(!is_lit(255, 0, 0, 255));
        assert!(!is_lit(0, 0, 255, 255));
    }

    #[test]
    fn test_is_lit_requires_opacity() {
        assert!(!is_lit(255, 255, 255, 0));
        assert!(!is_lit(255, 255, 255, 127));
        assert!(is_lit(255, 255, 255, 128));
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(is_lit(128, 128, 128, 255));
        assert!(!is_lit(127, 127, 127, 255));
    }
}
