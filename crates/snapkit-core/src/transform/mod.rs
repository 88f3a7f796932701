//! Pixel-space transforms applied between decode and encode.
//!
//! Two stages live here, in pipeline order:
//!
//! - **Orientation normalizer**: reads the EXIF orientation tag from the
//!   source file and rotates/mirrors the pixel data so the image displays
//!   upright. Metadata problems are never fatal; they degrade to the
//!   identity transform.
//! - **Resizer**: computes target dimensions from the requested
//!   width/height (independently, jointly, or neither) and produces a
//!   scaled copy using smooth interpolation.
//!
//! Both stages consume their input image and return a replacement value.

mod orientation;
mod resize;

pub use orientation::{normalize, orientation_from_bytes, read_orientation, Orientation};
pub use resize::{plan_dimensions, resize, FilterType, ResizeError};
