//! Image encoding for the capture pipeline.
//!
//! The pipeline serializes processed pixel data to one of two formats:
//!
//! - **JPEG**: lossy, with a caller-supplied quality (0 = smallest,
//!   100 = best). This is the default and what camera captures use.
//! - **PNG**: lossless; any quality setting is ignored.
//!
//! Both encoders validate dimensions and buffer length before touching the
//! codec, so a malformed image fails fast with a precise error.

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur while encoding or persisting an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded bytes through the file sink failed
    #[error("Writing encoded image failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// Output format selection for the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG at a caller-supplied quality.
    #[default]
    Jpeg,
    /// Lossless PNG; quality is ignored.
    Png,
}

impl OutputFormat {
    /// The format name as reported in results ("jpeg" or "png").
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }

    /// The file extension used for sink-backed output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Serialize an image to the requested format.
///
/// JPEG honors `quality`; PNG is always encoded lossless and ignores it.
pub fn encode(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
    }
}

/// Reject zero dimensions and mismatched pixel buffers before encoding.
pub(crate) fn check_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
