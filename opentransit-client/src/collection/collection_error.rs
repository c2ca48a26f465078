use opentransit_core::artifact::ArtifactPathError;

#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("failed to connect to artifact source: {0}")]
    ConnectionError(String),
    #[error("request for {location} failed: {message}")]
    RequestError { location: String, message: String },
    #[error("failed to inflate gzip payload from {location}: {source}")]
    DecompressError {
        location: String,
        source: std::io::Error,
    },
    #[error("failed to deserialize payload from {location}: {source}")]
    DeserializeError {
        location: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    PathError(#[from] ArtifactPathError),
    #[error("local artifact cache at {path} failed: {source}")]
    CacheError {
        path: String,
        source: std::io::Error,
    },
}

impl CollectionError {
    /// missing artifacts are expected: not every agency/date/stat group
    /// combination has been precomputed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::NotFound(_))
    }
}
