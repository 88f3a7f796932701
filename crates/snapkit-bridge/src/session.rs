//! Per-invocation capture orchestration.
//!
//! Platform results (permission prompts, capture UIs) arrive as events long
//! after the action that started them. Instead of parking the in-flight
//! request in mutable plugin fields, each invocation owns a
//! [`CaptureSession`]: an explicit state machine the host feeds events into.
//! Sessions are independent values, so overlapping invocations cannot
//! clobber each other's options or callback.
//!
//! ```text
//! AwaitingPermission --granted--> AwaitingCapture --image--> Processing --> Done
//!         \--denied--> Done               \--cancelled-----------------/
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use snapkit_core::{
    decode_image, process, FileSink, GalleryPublisher, PipelineError, PipelineRequest,
    TransformOptions,
};

use crate::callback::Callback;

/// Which platform surface a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The camera capture UI.
    Camera,
    /// The gallery/photo-library picker.
    Gallery,
}

/// Observable lifecycle of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPermission,
    AwaitingCapture,
    Processing,
    Done,
}

/// What the platform surface produced.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// An image was captured or picked.
    Image {
        /// Raw file bytes as delivered by the platform.
        bytes: Vec<u8>,
        /// Original file location, when resolvable. Camera captures have
        /// one; gallery picks often do not.
        source_path: Option<PathBuf>,
    },
    /// The user dismissed the UI without producing an image.
    Cancelled,
}

/// Launches the platform capture or picker UI.
///
/// Launching is fire-and-forget; the eventual result comes back through
/// [`CaptureSession::capture_result`].
pub trait CaptureLauncher: Send + Sync {
    fn launch(&self, kind: SourceKind);
}

/// One in-flight capture invocation.
pub struct CaptureSession {
    kind: SourceKind,
    options: TransformOptions,
    callback: Callback,
    state: SessionState,
    launcher: Arc<dyn CaptureLauncher>,
    sink: Arc<dyn FileSink>,
    gallery: Option<Arc<dyn GalleryPublisher>>,
}

impl CaptureSession {
    pub fn new(
        kind: SourceKind,
        options: TransformOptions,
        callback: Callback,
        launcher: Arc<dyn CaptureLauncher>,
        sink: Arc<dyn FileSink>,
        gallery: Option<Arc<dyn GalleryPublisher>>,
    ) -> Self {
        Self {
            kind,
            options,
            callback,
            state: SessionState::AwaitingPermission,
            launcher,
            sink,
            gallery,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Feed the platform's answer to the permission prompt.
    ///
    /// Denial terminates the session with a `PermissionDenied` error; a
    /// grant launches the capture UI. Out-of-order events are ignored.
    pub fn permission_result(&mut self, granted: bool) {
        if self.state != SessionState::AwaitingPermission {
            log::warn!(
                "ignoring permission result in state {:?}",
                self.state
            );
            return;
        }

        if granted {
            self.state = SessionState::AwaitingCapture;
            self.launcher.launch(self.kind);
        } else {
            self.state = SessionState::Done;
            self.callback
                .error(PipelineError::PermissionDenied.to_string());
        }
    }

    /// Feed the result of the capture or picker UI.
    ///
    /// Runs the processing pipeline for a delivered image and fires the
    /// callback with exactly one terminal outcome. Out-of-order events are
    /// ignored.
    pub fn capture_result(&mut self, outcome: CaptureOutcome) {
        if self.state != SessionState::AwaitingCapture {
            log::warn!("ignoring capture result in state {:?}", self.state);
            return;
        }
        self.state = SessionState::Processing;

        match outcome {
            CaptureOutcome::Cancelled => {
                self.callback.error(PipelineError::Cancelled.to_string());
            }
            CaptureOutcome::Image { bytes, source_path } => {
                let delivered = run_pipeline(
                    &bytes,
                    source_path,
                    self.options,
                    self.sink.as_ref(),
                    self.gallery.as_deref(),
                );
                match delivered {
                    Ok(payload) => self.callback.success(payload),
                    Err(message) => self.callback.error(message),
                }
            }
        }

        self.state = SessionState::Done;
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn run_pipeline(
    bytes: &[u8],
    source_path: Option<PathBuf>,
    options: TransformOptions,
    sink: &dyn FileSink,
    gallery: Option<&dyn GalleryPublisher>,
) -> Result<Value, String> {
    let image = decode_image(bytes).map_err(|e| PipelineError::from(e).to_string())?;

    let request = PipelineRequest {
        image,
        source_path,
        options,
    };
    let result = process(request, sink, gallery).map_err(|e| e.to_string())?;

    serde_json::to_value(&result).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::Outcome;
    use snapkit_core::encode::{encode_jpeg, encode_png};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<SourceKind>>,
    }

    impl CaptureLauncher for RecordingLauncher {
        fn launch(&self, kind: SourceKind) {
            self.launched.lock().unwrap().push(kind);
        }
    }

    #[derive(Default)]
    struct MemorySink {
        stored: Mutex<Vec<Vec<u8>>>,
    }

    impl FileSink for MemorySink {
        fn store(&self, bytes: &[u8], extension: &str) -> std::io::Result<PathBuf> {
            let mut stored = self.stored.lock().unwrap();
            let path = PathBuf::from(format!("/scratch/capture_{}.{}", stored.len(), extension));
            stored.push(bytes.to_vec());
            Ok(path)
        }

        fn cleanup(&self) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    fn capturing() -> (Callback, Arc<Mutex<Vec<Outcome>>>) {
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&outcomes);
        let callback = Callback::new(move |outcome| captured.lock().unwrap().push(outcome));
        (callback, outcomes)
    }

    fn session_with(
        launcher: Arc<RecordingLauncher>,
        options: TransformOptions,
    ) -> (CaptureSession, Arc<Mutex<Vec<Outcome>>>) {
        let (callback, outcomes) = capturing();
        let session = CaptureSession::new(
            SourceKind::Camera,
            options,
            callback,
            launcher,
            Arc::new(MemorySink::default()),
            None,
        );
        (session, outcomes)
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        encode_jpeg(
            &vec![128u8; (width * height * 3) as usize],
            width,
            height,
            90,
        )
        .unwrap()
    }

    #[test]
    fn test_denied_permission_terminates_with_error() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(Arc::clone(&launcher), Default::default());

        session.permission_result(false);

        assert_eq!(session.state(), SessionState::Done);
        assert!(launcher.launched.lock().unwrap().is_empty());

        let outcomes = outcomes.lock().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            outcomes[0],
            Err("Camera or gallery permission was denied".to_string())
        );
    }

    #[test]
    fn test_granted_permission_launches_capture_ui() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(Arc::clone(&launcher), Default::default());

        session.permission_result(true);

        assert_eq!(session.state(), SessionState::AwaitingCapture);
        assert_eq!(*launcher.launched.lock().unwrap(), vec![SourceKind::Camera]);
        assert!(outcomes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancelled_capture_terminates_with_error() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(launcher, Default::default());

        session.permission_result(true);
        session.capture_result(CaptureOutcome::Cancelled);

        assert_eq!(session.state(), SessionState::Done);
        let outcomes = outcomes.lock().unwrap();
        assert_eq!(
            outcomes[0],
            Err("Capture was cancelled before an image was delivered".to_string())
        );
    }

    #[test]
    fn test_successful_capture_delivers_result_payload() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(launcher, Default::default());

        session.permission_result(true);
        session.capture_result(CaptureOutcome::Image {
            bytes: jpeg_bytes(12, 8),
            source_path: None,
        });

        assert_eq!(session.state(), SessionState::Done);

        let outcomes = outcomes.lock().unwrap();
        assert_eq!(outcomes.len(), 1);
        let payload = outcomes[0].as_ref().unwrap();
        assert_eq!(payload["width"], 12);
        assert_eq!(payload["height"], 8);
        assert_eq!(payload["format"], "jpeg");
        assert!(payload["imageData"].is_string());
    }

    #[test]
    fn test_options_reach_the_pipeline() {
        let launcher = Arc::new(RecordingLauncher::default());
        let options = TransformOptions {
            target_width: 6,
            format: snapkit_core::OutputFormat::Png,
            ..Default::default()
        };
        let (mut session, outcomes) = session_with(launcher, options);

        session.permission_result(true);
        session.capture_result(CaptureOutcome::Image {
            bytes: encode_png(&vec![10u8; 12 * 8 * 3], 12, 8).unwrap(),
            source_path: None,
        });

        let outcomes = outcomes.lock().unwrap();
        let payload = outcomes[0].as_ref().unwrap();
        assert_eq!(payload["width"], 6);
        assert_eq!(payload["height"], 4);
        assert_eq!(payload["format"], "png");
    }

    #[test]
    fn test_undecodable_bytes_terminate_with_error() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(launcher, Default::default());

        session.permission_result(true);
        session.capture_result(CaptureOutcome::Image {
            bytes: vec![0x00, 0x01, 0x02],
            source_path: None,
        });

        let outcomes = outcomes.lock().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_err());
    }

    #[test]
    fn test_out_of_order_capture_result_is_ignored() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(launcher, Default::default());

        // Still awaiting permission; the event must be inert.
        session.capture_result(CaptureOutcome::Cancelled);

        assert_eq!(session.state(), SessionState::AwaitingPermission);
        assert!(outcomes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_events_fire_exactly_one_outcome() {
        let launcher = Arc::new(RecordingLauncher::default());
        let (mut session, outcomes) = session_with(launcher, Default::default());

        session.permission_result(true);
        session.permission_result(false);
        session.capture_result(CaptureOutcome::Cancelled);
        session.capture_result(CaptureOutcome::Cancelled);

        assert_eq!(outcomes.lock().unwrap().len(), 1);
    }
}
