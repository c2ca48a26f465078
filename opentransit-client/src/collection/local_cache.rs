use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::CollectionError;

/// directory of decompressed artifact JSON, laid out by
/// [`opentransit_core::artifact::ArtifactRequest::local_cache_path`].
/// artifacts are immutable once published, so entries never expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifactCache {
    root: PathBuf,
}

impl LocalArtifactCache {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// contents of a cached artifact, `None` when it has not been cached
    pub async fn read(&self, relative: &str) -> Result<Option<Vec<u8>>, CollectionError> {
        let path = self.path(relative);
        match tokio::fs::read(&path).await {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(cache_error(&path, source)),
        }
    }

    /// "mkdir -p" of the parent directory, then writes the artifact
    pub async fn write(&self, relative: &str, json: &[u8]) -> Result<(), CollectionError> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| cache_error(parent, source))?;
        }
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| cache_error(&path, source))
    }
}

fn cache_error(path: &Path, source: std::io::Error) -> CollectionError {
    CollectionError::CacheError {
        path: path.to_string_lossy().to_string(),
        source,
    }
}
