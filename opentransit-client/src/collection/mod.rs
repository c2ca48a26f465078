mod artifact_decoder;
mod artifact_source;
mod collection_error;
mod collector;
mod collector_config;
mod local_cache;

pub use artifact_decoder::{decode_artifact, inflate_artifact};
pub use artifact_source::{ArtifactSource, ArtifactSourceConfig};
pub use collection_error::CollectionError;
pub use collector::ArtifactCollector;
pub use collector_config::ArtifactCollectorConfig;
pub use local_cache::LocalArtifactCache;
