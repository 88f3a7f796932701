//! Byte-stream decoding with container sniffing.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Decode image bytes into an RGB pixel buffer.
///
/// The container format (JPEG or PNG) is guessed from the byte stream, so
/// the caller does not need to know what the platform picker delivered.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image container, or `DecodeError::Corrupted` if decoding fails partway.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}
