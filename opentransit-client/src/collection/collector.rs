use opentransit_core::artifact::{ArtifactRequest, ArtifactVersions};
use serde::de::DeserializeOwned;
use std::time::Instant;

use super::ArtifactCollectorConfig;
use super::ArtifactSource;
use super::CollectionError;
use super::LocalArtifactCache;
use super::{decode_artifact, inflate_artifact};

/// Holds the artifact source and the artifact versions and collects typed
/// artifacts by [`ArtifactRequest`]. With a local cache, artifacts found on
/// disk are not requested again and fetched ones are stored decompressed.
#[derive(Debug, Clone)]
pub struct ArtifactCollector {
    source: ArtifactSource,
    versions: ArtifactVersions,
    cache: Option<LocalArtifactCache>,
}

impl TryFrom<ArtifactCollectorConfig> for ArtifactCollector {
    type Error = CollectionError;

    fn try_from(value: ArtifactCollectorConfig) -> Result<Self, Self::Error> {
        value.build()
    }
}

impl ArtifactCollector {
    pub fn new(source: ArtifactSource, versions: ArtifactVersions) -> Self {
        Self {
            source,
            versions,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: LocalArtifactCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&LocalArtifactCache> {
        self.cache.as_ref()
    }

    pub fn versions(&self) -> &ArtifactVersions {
        &self.versions
    }

    /// where the artifact of a request is read from
    pub fn location(&self, request: &ArtifactRequest) -> Result<String, CollectionError> {
        let key = request.object_key(&self.versions)?;
        Ok(self.source.location(&key))
    }

    /// reads the artifact from the local cache when present, otherwise
    /// issues one read to the source and decodes it. no retries.
    pub async fn collect<T: DeserializeOwned>(
        &self,
        request: &ArtifactRequest,
    ) -> Result<T, CollectionError> {
        let key = request.object_key(&self.versions)?;
        let cached = match &self.cache {
            Some(cache) => Some((cache, request.local_cache_path(&self.versions)?)),
            None => None,
        };
        if let Some((cache, relative)) = &cached {
            if let Some(artifact) = read_cached(cache, relative).await {
                return Ok(artifact);
            }
        }

        let location = self.source.location(&key);
        let start = Instant::now();
        let body = self.source.get(&key).await?;
        let json = inflate_artifact(&location, &body)?;
        let artifact = decode_artifact(&location, &json)?;
        log::info!(
            "collected {} artifact from {location} ({} bytes) in {:.2?}",
            request.kind(),
            body.len(),
            start.elapsed()
        );

        if let Some((cache, relative)) = &cached {
            if let Err(e) = cache.write(relative, &json).await {
                log::warn!("not caching {} artifact: {e}", request.kind());
            }
        }
        Ok(artifact)
    }
}

/// a cached artifact that cannot be read or decoded is fetched again
async fn read_cached<T: DeserializeOwned>(cache: &LocalArtifactCache, relative: &str) -> Option<T> {
    let location = cache.path(relative).to_string_lossy().to_string();
    match cache.read(relative).await {
        Ok(Some(json)) => match decode_artifact(&location, &json) {
            Ok(artifact) => {
                log::debug!("read artifact from local cache {location}");
                Some(artifact)
            }
            Err(e) => {
                log::warn!("ignoring cached artifact: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::ArtifactCollector;
    use crate::collection::{ArtifactSource, CollectionError, LocalArtifactCache};
    use chrono::NaiveDate;
    use object_store::{memory::InMemory, path::Path, ObjectStore, PutPayload};
    use opentransit_core::artifact::{
        payload::{RoutesArtifact, TripTimesArtifact},
        ArtifactRequest, ArtifactVersions, StatGroup,
    };
    use std::path::PathBuf;
    use std::sync::Arc;

    const ROUTES: &str = r#"{"version":"v3a","routes":[
        {"id":"1","title":"1-California","directions":[{"id":"0","title":"Outbound","stops":["A","B","C"]}],
         "stops":{"A":{"id":"A","title":"Clay St & Drumm St","lat":37.79,"lon":-122.39}}}]}"#;

    const ROUTES_KEY: &str = "routes/v3a/routes_v3a_muni.json.gz";
    const ROUTES_CACHE_PATH: &str = "routes_v3a_muni/routes_v3a_muni.json";

    async fn collector() -> ArtifactCollector {
        let store = Arc::new(InMemory::new());
        store
            .put(
                &Path::from(ROUTES_KEY),
                PutPayload::from(ROUTES.as_bytes().to_vec()),
            )
            .await
            .unwrap();
        ArtifactCollector::new(ArtifactSource::ObjectStore(store), ArtifactVersions::default())
    }

    fn routes_request() -> ArtifactRequest {
        ArtifactRequest::Routes {
            agency_id: String::from("muni"),
        }
    }

    fn temp_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("opentransit-{name}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_collect_routes() {
        let collector = collector().await;
        let request = ArtifactRequest::Routes {
            agency_id: String::from("muni"),
        };
        let routes: RoutesArtifact = collector.collect(&request).await.unwrap();
        assert_eq!(routes.routes.len(), 1);
        assert_eq!(routes.routes[0].title, "1-California");
        assert_eq!(routes.routes[0].stop_title("A"), "Clay St & Drumm St");
    }

    #[tokio::test]
    async fn test_collect_missing_trip_times() {
        let collector = collector().await;
        let request = ArtifactRequest::TripTimes {
            agency_id: String::from("muni"),
            date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            stat_group: StatGroup::Median,
            time_window: None,
        };
        let result: Result<TripTimesArtifact, _> = collector.collect(&request).await;
        assert!(matches!(result, Err(CollectionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_agency_is_path_error() {
        let collector = collector().await;
        let request = ArtifactRequest::Routes {
            agency_id: String::from("../muni"),
        };
        let result: Result<RoutesArtifact, _> = collector.collect(&request).await;
        assert!(matches!(result, Err(CollectionError::PathError(_))));
    }

    #[tokio::test]
    async fn test_fetched_artifact_written_to_cache_and_reused() {
        let root = temp_root("collector-write");
        let store = Arc::new(InMemory::new());
        store
            .put(&Path::from(ROUTES_KEY), PutPayload::from(ROUTES.as_bytes().to_vec()))
            .await
            .unwrap();
        let collector = ArtifactCollector::new(
            ArtifactSource::ObjectStore(store.clone()),
            ArtifactVersions::default(),
        )
        .with_cache(LocalArtifactCache::new(&root));

        let routes: RoutesArtifact = collector.collect(&routes_request()).await.unwrap();
        assert_eq!(routes.routes.len(), 1);
        let written = std::fs::read_to_string(root.join(ROUTES_CACHE_PATH)).unwrap();
        assert_eq!(written, ROUTES);

        store.delete(&Path::from(ROUTES_KEY)).await.unwrap();
        let routes: RoutesArtifact = collector.collect(&routes_request()).await.unwrap();
        assert_eq!(routes.routes[0].title, "1-California");
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_cached_artifact_read_without_source() {
        let root = temp_root("collector-read");
        let cache = LocalArtifactCache::new(&root);
        cache.write(ROUTES_CACHE_PATH, ROUTES.as_bytes()).await.unwrap();
        let collector = ArtifactCollector::new(
            ArtifactSource::ObjectStore(Arc::new(InMemory::new())),
            ArtifactVersions::default(),
        )
        .with_cache(cache);

        let routes: RoutesArtifact = collector.collect(&routes_request()).await.unwrap();
        assert_eq!(routes.routes[0].stop_title("A"), "Clay St & Drumm St");
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_unreadable_cache_entry_refetched() {
        let root = temp_root("collector-corrupt");
        let cache = LocalArtifactCache::new(&root);
        cache.write(ROUTES_CACHE_PATH, b"{\"routes\":").await.unwrap();
        let collector = collector().await.with_cache(cache);

        let routes: RoutesArtifact = collector.collect(&routes_request()).await.unwrap();
        assert_eq!(routes.routes.len(), 1);
        let rewritten = std::fs::read_to_string(root.join(ROUTES_CACHE_PATH)).unwrap();
        assert_eq!(rewritten, ROUTES);
        std::fs::remove_dir_all(&root).unwrap();
    }
}
