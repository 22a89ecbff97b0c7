//! Core types for image decoding.

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes do not start with a PNG signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// How decoded pixels are handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    /// Keep full RGBA samples.
    #[default]
    Rgba,
    /// Reduce each pixel to one bit with the luminance threshold.
    Mono,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("bad chunk".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: bad chunk");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }

    #[test]
    fn test_default_mode() {
        assert_eq!(PixelMode::default(), PixelMode::Rgba);
    }
}
