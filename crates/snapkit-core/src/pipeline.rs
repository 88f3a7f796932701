//! The one-shot capture pipeline.
//!
//! Each user-initiated capture or gallery pick runs this sequence exactly
//! once:
//!
//! ```text
//! decoded image -> [normalize] -> [resize] -> encode -> payload -> [gallery]
//! ```
//!
//! Bracketed stages are skipped per options. The pipeline holds no state
//! between invocations: everything it needs arrives in a
//! [`PipelineRequest`], and it terminates in either a [`CaptureResult`] or a
//! single fatal [`PipelineError`], never a partial result.
//!
//! The pipeline is synchronous. Hosts are expected to run it off their
//! primary execution context; nothing here blocks on anything but CPU and
//! the file sink.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::decode::DecodedImage;
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::error::PipelineError;
use crate::options::{ReturnMode, TransformOptions};
use crate::sink::FileSink;
use crate::transform::{normalize, read_orientation, resize, FilterType};

/// Optional collaborator persisting the processed image into the user's
/// media library. Failures are logged and never fail the capture.
pub trait GalleryPublisher: Send + Sync {
    fn publish(&self, image: &DecodedImage) -> std::io::Result<()>;
}

/// Everything one invocation needs, threaded explicitly instead of living
/// in shared mutable state.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// The decoded capture or gallery pick.
    pub image: DecodedImage,
    /// Filesystem location of the original file, when the platform can
    /// resolve one. Orientation metadata is only read from here; gallery
    /// picks without a resolvable path skip orientation correction.
    pub source_path: Option<PathBuf>,
    /// Per-invocation configuration.
    pub options: TransformOptions,
}

/// The result record delivered to the shell.
///
/// `width`/`height` are the final post-transform dimensions and `format` is
/// the format actually encoded, never the originally requested values.
/// `image_data` is either inline base64 or a `file://` URI, exclusively per
/// the requested return mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureResult {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    #[serde(rename = "imageData")]
    pub image_data: String,
}

/// Run the capture pipeline to completion.
///
/// # Errors
///
/// Any stage failure aborts the invocation with the corresponding
/// [`PipelineError`]; orientation-metadata problems are absorbed (see
/// [`read_orientation`]).
pub fn process(
    request: PipelineRequest,
    sink: &dyn FileSink,
    gallery: Option<&dyn GalleryPublisher>,
) -> Result<CaptureResult, PipelineError> {
    let PipelineRequest {
        image,
        source_path,
        options,
    } = request;

    // Orientation metadata is only trustworthy when the original file is
    // reachable; otherwise no orientation assumption is made.
    let image = match source_path {
        Some(path) if options.correct_orientation => {
            normalize(image, read_orientation(&path))
        }
        _ => image,
    };

    let image = resize(
        image,
        options.target_width,
        options.target_height,
        FilterType::default(),
    )?;

    let bytes = encode(&image, options.format, options.quality)?;

    let image_data = match options.return_mode {
        ReturnMode::Base64 => STANDARD.encode(&bytes),
        ReturnMode::FileUri => {
            let path = sink
                .store(&bytes, options.format.extension())
                .map_err(EncodeError::Sink)?;
            format!("file://{}", path.display())
        }
    };

    if options.save_to_gallery {
        if let Some(gallery) = gallery {
            if let Err(e) = gallery.publish(&image) {
                // Fire-and-forget: the result is already final.
                log::warn!("gallery publish failed: {}", e);
            }
        }
    }

    Ok(CaptureResult {
        width: image.width,
        height: image.height,
        format: options.format,
        image_data,
    })
}
