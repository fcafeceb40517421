//! Handing finished reports to the outside world.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

/// A generated document and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Create an artifact.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Suggested file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Document contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the artifact, returning its contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Somewhere an artifact can be delivered.
pub trait ExportSink {
    /// Deliver `artifact`, returning where it ended up.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be delivered.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Writes artifacts as files into a directory, replacing same-named files.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    /// Create a sink for `dir`. The directory is created on first delivery.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectoryExportSink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::DirectoryCreate {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(artifact.file_name());
        fs::write(&path, artifact.bytes())
            .map_err(|e| Error::export(artifact.file_name(), e.to_string()))?;
        info!("Wrote {} ({} bytes)", path.display(), artifact.bytes().len());
        Ok(path)
    }
}
