//! Capture options and their loosely-typed wire form.
//!
//! Hybrid shells pass options as a JSON object with no schema enforcement.
//! [`TransformOptions::from_value`] applies the documented defaults whenever
//! a key is absent or carries the wrong JSON type, so a sloppy caller always
//! gets a usable configuration instead of an error.

use serde_json::Value;

use crate::encode::OutputFormat;

/// JPEG quality used when the caller does not specify one.
pub const DEFAULT_QUALITY: u8 = 85;

/// How the encoded bytes are returned to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnMode {
    /// Inline standard base64 text, no line wrapping.
    #[default]
    Base64,
    /// A `file://` URI pointing at a sink-managed file.
    FileUri,
}

/// Per-invocation configuration for the capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Apply the EXIF orientation fix when a source path is available.
    pub correct_orientation: bool,
    /// Requested output width in pixels; 0 means unset.
    pub target_width: u32,
    /// Requested output height in pixels; 0 means unset.
    pub target_height: u32,
    /// JPEG quality, 0-100. Ignored for PNG output.
    pub quality: u8,
    /// Output encoding format.
    pub format: OutputFormat,
    /// Inline base64 vs. file reference.
    pub return_mode: ReturnMode,
    /// Also persist the processed image into the user's media library.
    pub save_to_gallery: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            correct_orientation: true,
            target_width: 0,
            target_height: 0,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::Jpeg,
            return_mode: ReturnMode::Base64,
            save_to_gallery: false,
        }
    }
}

impl TransformOptions {
    /// Build options from the shell's loosely-typed JSON map.
    ///
    /// Recognized keys: `correctOrientation` (bool), `targetWidth` /
    /// `targetHeight` (non-negative int), `quality` (int 0-100),
    /// `encodingType` (int, 1 = PNG, anything else = JPEG), `returnType`
    /// (string, `"fileURI"` or `"base64"`), `saveToGallery` (bool).
    ///
    /// Any key that is absent or not of the expected type falls back to its
    /// default. Out-of-range numbers are clamped rather than rejected.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();

        Self {
            correct_orientation: opt_bool(value, "correctOrientation")
                .unwrap_or(defaults.correct_orientation),
            target_width: opt_dimension(value, "targetWidth"),
            target_height: opt_dimension(value, "targetHeight"),
            quality: opt_int(value, "quality")
                .map(|q| q.clamp(0, 100) as u8)
                .unwrap_or(defaults.quality),
            format: match opt_int(value, "encodingType") {
                Some(1) => OutputFormat::Png,
                _ => OutputFormat::Jpeg,
            },
            return_mode: match value.get("returnType").and_then(Value::as_str) {
                Some("fileURI") => ReturnMode::FileUri,
                _ => ReturnMode::Base64,
            },
            save_to_gallery: opt_bool(value, "saveToGallery").unwrap_or(defaults.save_to_gallery),
        }
    }
}

fn opt_int(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(Value::as_i64)
}

fn opt_bool(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

fn opt_dimension(value: &Value, key: &str) -> u32 {
    opt_int(value, key).map(|v| v.max(0) as u32).unwrap_or(0)
}
