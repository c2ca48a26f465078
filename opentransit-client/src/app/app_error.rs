use opentransit_agency::AgencyConfigError;
use opentransit_core::artifact::ArtifactPathError;

use crate::collection::CollectionError;
use crate::metrics::MetricsError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ConfigError(#[from] AgencyConfigError),
    #[error(transparent)]
    CollectionError(#[from] CollectionError),
    #[error(transparent)]
    MetricsError(#[from] MetricsError),
    #[error(transparent)]
    PathError(#[from] ArtifactPathError),
    #[error("failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("error creating a runtime to handle async code: {0}")]
    TokioError(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
