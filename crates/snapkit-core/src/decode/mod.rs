//! Image decoding for the capture pipeline.
//!
//! Platform shells hand the plugin the raw bytes of a captured or picked
//! image (camera JPEGs, gallery JPEG/PNG files). This module turns those
//! bytes into the [`DecodedImage`] pixel buffer the rest of the pipeline
//! operates on. The container format is guessed from the byte stream, so
//! callers never need to know whether a gallery pick was a JPEG or a PNG.
//!
//! Decoding failure is fatal: the pipeline never starts on bytes it cannot
//! turn into pixels.

mod reader;
mod types;

pub use reader::decode_image;
pub use types::{DecodeError, DecodedImage};
