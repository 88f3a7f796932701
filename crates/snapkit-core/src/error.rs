//! Crate-level error taxonomy for a capture invocation.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::ResizeError;

/// Terminal failure of a capture invocation.
///
/// Every variant is fatal: the invocation aborts, a single human-readable
/// message reaches the shell, and no partial result is produced. There is no
/// internal retry; the caller re-initiates the whole capture flow if it
/// wants another attempt.
///
/// Orientation-metadata problems never appear here: they degrade to the
/// identity transform inside the pipeline instead of failing it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The platform permission gate refused camera or gallery access.
    #[error("Camera or gallery permission was denied")]
    PermissionDenied,

    /// The user dismissed the capture or picker UI without producing an
    /// image.
    #[error("Capture was cancelled before an image was delivered")]
    Cancelled,

    /// The delivered bytes could not be decoded into a pixel buffer.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The resize stage rejected the source image.
    #[error(transparent)]
    Resize(#[from] ResizeError),

    /// Compression or file-sink write failure.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
