//! PNG encoding.
//!
//! Always lossless: a decode of the produced bytes reproduces the input
//! pixel buffer exactly. There is no quality knob.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{check_buffer, EncodeError};

/// Encode RGB pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or
/// `EncodeError::InvalidPixelData` for malformed input, and
/// `EncodeError::EncodingFailed` if the codec itself fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    check_buffer(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 20 * 10 * 3];
        let png = encode_png(&pixels, 20, 10).unwrap();

        // PNG signature.
        assert_eq!(&png[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_lossless_round_trip() {
        let mut pixels = Vec::with_capacity(16 * 16 * 3);
        for i in 0..16 * 16 {
            pixels.push((i % 256) as u8);
            pixels.push(((i * 7) % 256) as u8);
            pixels.push(((i * 13) % 256) as u8);
        }

        let png = encode_png(&pixels, 16, 16).unwrap();
        let decoded = crate::decode::decode_image(&png).unwrap();

        assert_eq!((decoded.width, decoded.height), (16, 16));
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let result = encode_png(&[0u8; 11], 2, 2);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        let result = encode_png(&[], 0, 5);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let png = encode_png(&[0, 255, 0], 1, 1).unwrap();
        let decoded = crate::decode::decode_image(&png).unwrap();
        assert_eq!(decoded.pixels, vec![0, 255, 0]);
    }
}
