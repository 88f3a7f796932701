//! Snapkit Bridge - plugin surface for hybrid shells
//!
//! This crate adapts the snapkit-core pipeline to the shape a hybrid
//! web/native shell expects from a camera plugin: named actions with
//! loosely-typed JSON options, platform events fed in as they arrive, and a
//! single-shot success/error callback per invocation.
//!
//! # Module Structure
//!
//! - `callback` - Exactly-once result delivery
//! - `session` - Per-invocation capture state machine
//! - `plugin` - Action dispatch (`takePicture`, `chooseFromGallery`,
//!   `cleanup`) and the platform collaborator seams
//!
//! # Usage
//!
//! ```ignore
//! use snapkit_bridge::{Callback, CameraPlugin, CaptureOutcome};
//!
//! let plugin = CameraPlugin::new(permissions, launcher, sink, None);
//!
//! let callback = Callback::new(|outcome| shell.deliver(outcome));
//! let mut session = plugin
//!     .execute("takePicture", &options_json, callback)
//!     .expect("capture actions return a session");
//!
//! // ...later, as platform events arrive:
//! session.permission_result(true);
//! session.capture_result(CaptureOutcome::Image { bytes, source_path });
//! ```

pub mod callback;
pub mod plugin;
pub mod session;

pub use callback::Callback;
pub use plugin::{Action, CameraPlugin, PermissionGate};
pub use session::{CaptureLauncher, CaptureOutcome, CaptureSession, SessionState, SourceKind};
