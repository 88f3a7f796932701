//! Snapkit Core - capture post-processing pipeline
//!
//! This crate is the host-independent heart of the Snapkit camera plugin:
//! it turns a captured or gallery-picked image into the processed payload a
//! hybrid shell hands back to its web layer.
//!
//! The pipeline is a fixed linear sequence with no state between
//! invocations:
//!
//! 1. **Decode**: sniff and decode JPEG/PNG bytes into an RGB buffer
//! 2. **Normalize**: apply the EXIF orientation fix (best-effort)
//! 3. **Resize**: honor the requested target dimensions
//! 4. **Encode**: re-encode as JPEG (lossy, quality 0-100) or PNG
//!    (lossless)
//! 5. **Deliver**: inline base64 or a `file://` reference through a
//!    [`sink::FileSink`]
//!
//! Platform concerns (permissions, capture UI, media library, transport)
//! stay behind the traits in [`sink`] and [`pipeline`]; the companion
//! bridge crate wires them to a shell.
//!
//! # Examples
//!
//! ```ignore
//! use snapkit_core::{decode_image, process, PipelineRequest, ScratchSink, TransformOptions};
//!
//! let image = decode_image(&jpeg_bytes)?;
//! let request = PipelineRequest {
//!     image,
//!     source_path: Some(captured_file),
//!     options: TransformOptions::default(),
//! };
//! let sink = ScratchSink::new("/tmp/snapkit");
//! let result = process(request, &sink, None)?;
//! println!("{}x{} {}", result.width, result.height, result.format.as_str());
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod sink;
pub mod transform;

pub use decode::{decode_image, DecodedImage};
pub use encode::OutputFormat;
pub use error::PipelineError;
pub use options::{ReturnMode, TransformOptions};
pub use pipeline::{process, CaptureResult, GalleryPublisher, PipelineRequest};
pub use sink::{FileSink, ScratchSink};
pub use transform::Orientation;
