mod artifact_kind;
mod artifact_path_error;
mod artifact_request;
mod artifact_versions;
mod path_component;
mod stat_group;
mod time_window;

pub mod payload;

pub use artifact_kind::ArtifactKind;
pub use artifact_path_error::ArtifactPathError;
pub use artifact_request::{bucket_url, stat_cache_key, ArtifactRequest};
pub use artifact_versions::ArtifactVersions;
pub use path_component::{validate_path_component, validate_time_range_path};
pub use stat_group::StatGroup;
pub use time_window::TimeWindow;

/// default object store bucket holding the precomputed artifacts
pub const DEFAULT_S3_BUCKET: &str = "opentransit-data";
