//! Action dispatch for the shell-facing plugin surface.
//!
//! The shell invokes the plugin by action name with a loosely-typed JSON
//! options object, exactly like a Cordova-style `exec` bridge. Capture
//! actions hand back a [`CaptureSession`] for the host to drive; `cleanup`
//! completes immediately.

use std::sync::Arc;

use serde_json::{json, Value};

use snapkit_core::{FileSink, GalleryPublisher, TransformOptions};

use crate::callback::Callback;
use crate::session::{CaptureLauncher, CaptureSession, SourceKind};

/// Platform permission seam.
pub trait PermissionGate: Send + Sync {
    /// Whether the permission backing `kind` is already granted.
    fn is_granted(&self, kind: SourceKind) -> bool;

    /// Ask the platform to prompt for the permission backing `kind`. The
    /// answer arrives later through [`CaptureSession::permission_result`].
    fn request(&self, kind: SourceKind);
}

/// Actions the shell can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TakePicture,
    ChooseFromGallery,
    Cleanup,
}

impl Action {
    /// Map a wire action name to an [`Action`].
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "takePicture" => Some(Self::TakePicture),
            "chooseFromGallery" => Some(Self::ChooseFromGallery),
            "cleanup" => Some(Self::Cleanup),
            _ => None,
        }
    }
}

/// The plugin entry point a hybrid shell talks to.
///
/// Holds only the long-lived collaborators; every invocation's state lives
/// in its own [`CaptureSession`].
pub struct CameraPlugin {
    permissions: Arc<dyn PermissionGate>,
    launcher: Arc<dyn CaptureLauncher>,
    sink: Arc<dyn FileSink>,
    gallery: Option<Arc<dyn GalleryPublisher>>,
}

impl CameraPlugin {
    pub fn new(
        permissions: Arc<dyn PermissionGate>,
        launcher: Arc<dyn CaptureLauncher>,
        sink: Arc<dyn FileSink>,
        gallery: Option<Arc<dyn GalleryPublisher>>,
    ) -> Self {
        Self {
            permissions,
            launcher,
            sink,
            gallery,
        }
    }

    /// Dispatch a shell invocation.
    ///
    /// Capture actions return the session the host must keep and feed
    /// platform events into. `cleanup` and unknown actions complete the
    /// callback immediately and return `None`. Every invocation receives
    /// exactly one callback outcome.
    pub fn execute(
        &self,
        action: &str,
        options: &Value,
        mut callback: Callback,
    ) -> Option<CaptureSession> {
        match Action::parse(action) {
            Some(Action::TakePicture) => Some(self.start(SourceKind::Camera, options, callback)),
            Some(Action::ChooseFromGallery) => {
                Some(self.start(SourceKind::Gallery, options, callback))
            }
            Some(Action::Cleanup) => {
                self.cleanup(&mut callback);
                None
            }
            None => {
                callback.error(format!("Unknown action: {action}"));
                None
            }
        }
    }

    fn start(&self, kind: SourceKind, options: &Value, callback: Callback) -> CaptureSession {
        let options = TransformOptions::from_value(options);
        let mut session = CaptureSession::new(
            kind,
            options,
            callback,
            Arc::clone(&self.launcher),
            Arc::clone(&self.sink),
            self.gallery.clone(),
        );

        if self.permissions.is_granted(kind) {
            session.permission_result(true);
        } else {
            self.permissions.request(kind);
        }

        session
    }

    fn cleanup(&self, callback: &mut Callback) {
        match self.sink.cleanup() {
            Ok(cleaned) => callback.success(json!({ "cleaned": cleaned })),
            Err(e) => callback.error(format!("Cleanup failed: {e}")),
        }
    }
}
