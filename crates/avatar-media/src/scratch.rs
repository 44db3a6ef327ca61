use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::MediaError;

/// Request-scoped directory for per-message media files
///
/// Removed when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh directory under `root`, or the system temp dir
    pub fn create(root: Option<&Path>) -> Result<Self, MediaError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("avatar-");

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(MediaError::Scratch)?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `message_{index}.{extension}` inside this directory
    pub fn message_file(&self, index: usize, extension: &str) -> PathBuf {
        self.dir.path().join(format!("message_{index}.{extension}"))
    }
}
