use opentransit_agency::DashboardConfig;
use opentransit_core::artifact::{ArtifactVersions, DEFAULT_S3_BUCKET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ArtifactCollector;
use super::ArtifactSourceConfig;
use super::CollectionError;
use super::LocalArtifactCache;

/// Serializable configuration for an [`ArtifactCollector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCollectorConfig {
    source: ArtifactSourceConfig,
    #[serde(default)]
    versions: ArtifactVersions,
    /// keep decompressed copies of fetched artifacts below this directory
    #[serde(default)]
    cache_dir: Option<PathBuf>,
}

impl Default for ArtifactCollectorConfig {
    fn default() -> Self {
        Self {
            source: ArtifactSourceConfig::public_bucket(DEFAULT_S3_BUCKET),
            versions: ArtifactVersions::default(),
            cache_dir: None,
        }
    }
}

impl From<&DashboardConfig> for ArtifactCollectorConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            source: ArtifactSourceConfig::public_bucket(&config.s3_bucket),
            versions: config.versions.clone(),
            cache_dir: config.cache_dir.clone(),
        }
    }
}

impl ArtifactCollectorConfig {
    pub fn new(source: ArtifactSourceConfig, versions: ArtifactVersions) -> Self {
        Self {
            source,
            versions,
            cache_dir: None,
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = Some(cache_dir);
        self
    }

    pub fn build(&self) -> Result<ArtifactCollector, CollectionError> {
        let collector = ArtifactCollector::new(self.source.build()?, self.versions.clone());
        match &self.cache_dir {
            Some(dir) => {
                log::debug!("caching artifacts in {}", dir.to_string_lossy());
                Ok(collector.with_cache(LocalArtifactCache::new(dir)))
            }
            None => Ok(collector),
        }
    }
}
