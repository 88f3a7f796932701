//! File persistence for file-reference results.
//!
//! The pipeline itself never invents paths; it hands encoded bytes to a
//! [`FileSink`], which owns location, naming, and retention. [`ScratchSink`]
//! is the bundled implementation: unique files in a scratch directory that
//! the shell can purge with the `cleanup` action.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Destination for encoded image bytes in file-reference mode.
pub trait FileSink: Send + Sync {
    /// Write bytes to a fresh, unique location and return its path.
    fn store(&self, bytes: &[u8], extension: &str) -> io::Result<PathBuf>;

    /// Purge the sink's scratch area, returning how many entries were
    /// removed.
    fn cleanup(&self) -> io::Result<usize>;
}

/// A sink writing `capture_*` files into a scratch directory.
///
/// The directory is created on first use. File names combine a millisecond
/// timestamp with a per-sink sequence number, so concurrent stores within
/// the same millisecond still get distinct paths.
#[derive(Debug)]
pub struct ScratchSink {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl ScratchSink {
    /// Create a sink rooted at `dir` (typically the app's cache directory).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// The scratch directory this sink writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unique_name(&self, extension: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("capture_{millis}_{seq}.{extension}")
    }
}

impl FileSink for ScratchSink {
    fn store(&self, bytes: &[u8], extension: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(self.unique_name(extension));
        fs::write(&path, bytes)?;
        Ok(path)
    }

    fn cleanup(&self) -> io::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A scratch dir that was never created has nothing to purge.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut cleaned = 0;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && fs::remove_file(&path).is_ok() {
                cleaned += 1;
            }
        }

        Ok(cleaned)
    }
}
