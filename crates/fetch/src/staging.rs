//! Process-local staging for downloads in flight
//!
//! Every request gets its own randomly named directory below the staging
//! root, so concurrent users never collide even when they fetch files with
//! the same name. Dropping the [`StagedFile`] removes that directory.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Root directory holding one subdirectory per request
#[derive(Debug)]
pub struct StagingArea {
    root: TempDir,
}

impl StagingArea {
    /// Create the staging root inside `parent`, or the OS temp dir
    pub fn new(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("tg_downloads_");
        let root = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        tracing::info!("Created staging directory: {}", root.path().display());
        Ok(Self { root })
    }

    /// Path of the staging root
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Reserve a fresh location for `filename`
    ///
    /// Nothing is written yet; the caller creates the file at [`StagedFile::path`].
    pub fn stage(&self, filename: &str) -> io::Result<StagedFile> {
        let dir = tempfile::Builder::new()
            .prefix("req-")
            .tempdir_in(self.root.path())?;
        let path = dir.path().join(filename);
        Ok(StagedFile {
            dir: Some(dir),
            path,
        })
    }
}

/// A file location owned by exactly one request
#[derive(Debug)]
pub struct StagedFile {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl StagedFile {
    /// Where the file lives (may not exist yet)
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let dir_path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => tracing::debug!("Removed staged file {}", self.path.display()),
                Err(e) => tracing::warn!(
                    "Failed to remove staging directory {}: {}",
                    dir_path.display(),
                    e
                ),
            }
        }
    }
}
