//! Exported artifacts and their delivery to local storage.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::DeliveryError;

/// Fixed file name for every delivered document.
pub const DEFAULT_FILENAME: &str = "project-documentation.pdf";

/// Content type expected from the export server.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A finished portable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    page_count: Option<usize>,
    filename: String,
}

impl Artifact {
    /// Wraps produced bytes under the default file name.
    ///
    /// `page_count` is known for locally assembled documents only.
    pub fn new(bytes: Vec<u8>, page_count: Option<usize>) -> Self {
        Self {
            bytes,
            page_count,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn page_count(&self) -> Option<usize> {
        self.page_count
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Writes artifacts into a directory.
///
/// Delivery is atomic: bytes go to a temporary file next to the target which
/// is renamed into place only after a full write. A failed delivery never
/// leaves a partial document behind.
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    output_dir: PathBuf,
}

impl ArtifactSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for a given artifact.
    pub fn target_path(&self, artifact: &Artifact) -> PathBuf {
        self.output_dir.join(artifact.filename())
    }

    /// Save the artifact and return the final path.
    pub fn deliver(&self, artifact: &Artifact) -> Result<PathBuf, DeliveryError> {
        let target = self.target_path(artifact);
        fs::create_dir_all(&self.output_dir).map_err(|source| DeliveryError::Io {
            operation: "create directory",
            path: self.output_dir.clone(),
            source,
        })?;

        // Dropping the handle on any early return removes the temporary file.
        let mut temp = NamedTempFile::new_in(&self.output_dir).map_err(|source| {
            DeliveryError::Io {
                operation: "create temporary file in",
                path: self.output_dir.clone(),
                source,
            }
        })?;
        temp.write_all(artifact.bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| DeliveryError::Io {
                operation: "write",
                path: temp.path().to_path_buf(),
                source,
            })?;
        temp.persist(&target).map_err(|err| DeliveryError::Io {
            operation: "rename into",
            path: target.clone(),
            source: err.error,
        })?;

        info!(path = %target.display(), bytes = artifact.len(), "delivered artifact");
        Ok(target)
    }
}
