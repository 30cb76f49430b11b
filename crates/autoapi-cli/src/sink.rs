use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::WriteError;

/// Where generated files go.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Remove everything under the output root and recreate it empty.
    async fn reset(&self) -> Result<(), WriteError>;

    /// Write `content` plus a trailing newline to `path`, relative to the root.
    async fn write(&self, path: &Path, content: &str) -> Result<(), WriteError>;
}

/// Writes files below a root directory.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl OutputSink for FsSink {
    async fn reset(&self) -> Result<(), WriteError> {
        let reset_error = |source| WriteError::Reset {
            path: self.root.clone(),
            source,
        };
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(reset_error(e)),
        }
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(reset_error)
    }

    async fn write(&self, path: &Path, content: &str) -> Result<(), WriteError> {
        let target = self.root.join(path);
        let write_error = |source| WriteError::Write {
            path: target.clone(),
            source,
        };
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_error)?;
        }
        tokio::fs::write(&target, format!("{content}\n"))
            .await
            .map_err(write_error)?;
        log::debug!("wrote {}", target.display());
        Ok(())
    }
}
