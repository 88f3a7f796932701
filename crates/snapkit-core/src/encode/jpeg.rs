//! JPEG encoding.
//!
//! Uses the `image` crate's JPEG encoder with a configurable quality
//! setting, matching the standard JPEG quality scale: 0 is worst/smallest,
//! 100 is best/largest.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{check_buffer, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (0-100; values are clamped into the encoder's
///   1-100 range)
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or
/// `EncodeError::InvalidPixelData` for malformed input, and
/// `EncodeError::EncodingFailed` if the codec itself fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_buffer(pixels, width, height)?;

    // The image crate's encoder accepts 1-100.
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    proptest! {
        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 0u8..=100,
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels = vec![128u8; size];

            let jpeg = encode_jpeg(&pixels, width, height, quality);
            prop_assert!(jpeg.is_ok());

            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 0u8..=100,
        ) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels = vec![100u8; size];

            let first = encode_jpeg(&pixels, width, height, quality).unwrap();
            let second = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert_eq!(first, second);
        }

        /// Property: Mismatched buffer lengths always return an error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            delta in 1usize..=16,
        ) {
            let expected = (width as usize) * (height as usize) * 3;
            let pixels = vec![128u8; expected + delta];

            let result = encode_jpeg(&pixels, width, height, 90);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "expected InvalidPixelData error, got {:?}",
                result
            );
        }
    }
}
