use object_store::{
    aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory, path::Path, ObjectStore,
};
use opentransit_core::artifact::bucket_url;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};

use super::CollectionError;

/// where artifacts are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ArtifactSourceConfig {
    /// plain HTTP GET against a public base URL
    Http { base_url: String },
    /// unsigned S3 requests against a public bucket
    AmazonS3 { bucket: String, region: String },
    /// a local copy of the bucket
    FileSystem { root: PathBuf },
    InMemory,
}

impl ArtifactSourceConfig {
    /// the public HTTP endpoint of a bucket
    pub fn public_bucket(bucket: &str) -> Self {
        ArtifactSourceConfig::Http {
            base_url: bucket_url(bucket),
        }
    }

    pub fn build(&self) -> Result<ArtifactSource, CollectionError> {
        match self {
            ArtifactSourceConfig::Http { base_url } => {
                let client = reqwest::Client::builder()
                    .build()
                    .map_err(|e| CollectionError::ConnectionError(e.to_string()))?;
                Ok(ArtifactSource::Http {
                    client,
                    base_url: base_url.trim_end_matches('/').to_string(),
                })
            }
            ArtifactSourceConfig::AmazonS3 { bucket, region } => {
                let object_store = AmazonS3Builder::new()
                    .with_region(region)
                    .with_bucket_name(bucket)
                    .with_skip_signature(true)
                    .build()
                    .map_err(|e| CollectionError::ConnectionError(e.to_string()))?;
                Ok(ArtifactSource::ObjectStore(Arc::new(object_store)))
            }
            ArtifactSourceConfig::FileSystem { root } => {
                let object_store = LocalFileSystem::new_with_prefix(root).map_err(|e| {
                    CollectionError::ConnectionError(format!(
                        "failure opening {}: {e}",
                        root.to_string_lossy()
                    ))
                })?;
                Ok(ArtifactSource::ObjectStore(Arc::new(object_store)))
            }
            ArtifactSourceConfig::InMemory => {
                Ok(ArtifactSource::ObjectStore(Arc::new(InMemory::new())))
            }
        }
    }
}

/// a built artifact source. missing objects (HTTP 403/404, object store
/// `NotFound`) are reported as [`CollectionError::NotFound`].
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    Http {
        client: reqwest::Client,
        base_url: String,
    },
    ObjectStore(Arc<dyn ObjectStore>),
}

impl ArtifactSource {
    /// human readable location of an object key, used in logs and errors
    pub fn location(&self, key: &str) -> String {
        match self {
            ArtifactSource::Http { base_url, .. } => format!("{base_url}/{key}"),
            ArtifactSource::ObjectStore(store) => format!("{store}/{key}"),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, CollectionError> {
        match self {
            ArtifactSource::Http { client, base_url } => {
                let url = format!("{base_url}/{key}");
                log::debug!("GET {url}");
                let response = client.get(&url).send().await.map_err(|e| {
                    CollectionError::RequestError {
                        location: url.clone(),
                        message: e.to_string(),
                    }
                })?;
                let status = response.status();
                if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
                    return Err(CollectionError::NotFound(url));
                }
                if !status.is_success() {
                    return Err(CollectionError::RequestError {
                        location: url,
                        message: format!("HTTP status {status}"),
                    });
                }
                let body = response
                    .bytes()
                    .await
                    .map_err(|e| CollectionError::RequestError {
                        location: url.clone(),
                        message: e.to_string(),
                    })?;
                Ok(body.to_vec())
            }
            ArtifactSource::ObjectStore(store) => {
                let path = Path::from(key);
                log::debug!("GET {store}/{path}");
                let result = store.get(&path).await.map_err(|e| match e {
                    object_store::Error::NotFound { .. } => {
                        CollectionError::NotFound(self.location(key))
                    }
                    other => CollectionError::RequestError {
                        location: self.location(key),
                        message: other.to_string(),
                    },
                })?;
                let body = result
                    .bytes()
                    .await
                    .map_err(|e| CollectionError::RequestError {
                        location: self.location(key),
                        message: e.to_string(),
                    })?;
                Ok(body.to_vec())
            }
        }
    }
}
