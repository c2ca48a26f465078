use super::{validate_path_component, validate_time_range_path};
use super::{ArtifactKind, ArtifactPathError, ArtifactVersions};
use super::{StatGroup, TimeWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// identifies one precomputed artifact. object keys and cache keys are pure
/// functions of the request and the artifact versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ArtifactRequest {
    Routes {
        agency_id: String,
    },
    TripTimes {
        agency_id: String,
        date: NaiveDate,
        stat_group: StatGroup,
        time_window: Option<TimeWindow>,
    },
    WaitTimes {
        agency_id: String,
        date: NaiveDate,
        stat_group: StatGroup,
        time_window: Option<TimeWindow>,
    },
    Arrivals {
        agency_id: String,
        date: NaiveDate,
        route_id: String,
    },
}

impl ArtifactRequest {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactRequest::Routes { .. } => ArtifactKind::Routes,
            ArtifactRequest::TripTimes { .. } => ArtifactKind::TripTimes,
            ArtifactRequest::WaitTimes { .. } => ArtifactKind::WaitTimes,
            ArtifactRequest::Arrivals { .. } => ArtifactKind::Arrivals,
        }
    }

    pub fn agency_id(&self) -> &str {
        match self {
            ArtifactRequest::Routes { agency_id }
            | ArtifactRequest::TripTimes { agency_id, .. }
            | ArtifactRequest::WaitTimes { agency_id, .. }
            | ArtifactRequest::Arrivals { agency_id, .. } => agency_id,
        }
    }

    /// object key of the artifact relative to the bucket root, e.g.
    /// `trip-times/v1a/muni/2020/01/15/trip-times_v1a_muni_2020-01-15_median.json.gz`
    pub fn object_key(&self, versions: &ArtifactVersions) -> Result<String, ArtifactPathError> {
        let kind = self.kind();
        let prefix = kind.prefix();
        let version = validate_path_component("version", versions.get(kind))?;
        let agency_id = validate_path_component("agency id", self.agency_id())?;
        match self {
            ArtifactRequest::Routes { .. } => {
                Ok(format!("{prefix}/{version}/{prefix}_{version}_{agency_id}.json.gz"))
            }
            ArtifactRequest::TripTimes {
                date,
                stat_group,
                time_window,
                ..
            }
            | ArtifactRequest::WaitTimes {
                date,
                stat_group,
                time_window,
                ..
            } => {
                let stat_id = validate_path_component("stat group", stat_group.as_str())?;
                let time_path = time_range_path(time_window.as_ref())?;
                Ok(format!(
                    "{prefix}/{version}/{agency_id}/{}/{prefix}_{version}_{agency_id}_{}_{stat_id}{time_path}.json.gz",
                    date_path(date),
                    date_str(date),
                ))
            }
            ArtifactRequest::Arrivals { date, route_id, .. } => {
                let route_id = validate_path_component("route id", route_id)?;
                Ok(format!(
                    "{prefix}/{version}/{agency_id}/{}/{prefix}_{version}_{agency_id}_{}_{route_id}.json.gz",
                    date_path(date),
                    date_str(date),
                ))
            }
        }
    }

    /// path of the decompressed artifact below a local cache directory, e.g.
    /// `wait-times_v1b_muni/2020-01-15/wait-times_v1b_muni_2020-01-15_median.json`
    pub fn local_cache_path(&self, versions: &ArtifactVersions) -> Result<String, ArtifactPathError> {
        let kind = self.kind();
        let version = validate_path_component("version", versions.get(kind))?;
        let agency_id = validate_path_component("agency id", self.agency_id())?;
        let dir = format!("{}_{version}_{agency_id}", kind.prefix());
        match self {
            ArtifactRequest::Routes { .. } => Ok(format!("{dir}/{dir}.json")),
            ArtifactRequest::TripTimes {
                date,
                stat_group,
                time_window,
                ..
            }
            | ArtifactRequest::WaitTimes {
                date,
                stat_group,
                time_window,
                ..
            } => {
                let stat_id = validate_path_component("stat group", stat_group.as_str())?;
                let time_path = time_range_path(time_window.as_ref())?;
                let date = date_str(date);
                Ok(format!("{dir}/{date}/{dir}_{date}_{stat_id}{time_path}.json"))
            }
            ArtifactRequest::Arrivals { date, route_id, .. } => {
                let route_id = validate_path_component("route id", route_id)?;
                let date = date_str(date);
                Ok(format!("{dir}/{date}/{dir}_{date}_{route_id}.json"))
            }
        }
    }

    /// fully qualified URL of the artifact in a public bucket
    pub fn url(&self, bucket: &str, versions: &ArtifactVersions) -> Result<String, ArtifactPathError> {
        let key = self.object_key(versions)?;
        Ok(format!("{}/{key}", bucket_url(bucket)))
    }

    /// key of the response cache entry holding this artifact. trip-time and
    /// wait-time keys have the form `${agencyId}-${dateStr+timeStr}-${statGroup}`;
    /// the two kinds are cached separately so they may share a key.
    pub fn cache_key(&self) -> String {
        match self {
            ArtifactRequest::Routes { agency_id } => agency_id.clone(),
            ArtifactRequest::TripTimes {
                agency_id,
                date,
                stat_group,
                time_window,
            }
            | ArtifactRequest::WaitTimes {
                agency_id,
                date,
                stat_group,
                time_window,
            } => stat_cache_key(agency_id, date, stat_group, time_window.as_ref()),
            ArtifactRequest::Arrivals {
                agency_id,
                date,
                route_id,
            } => format!("{agency_id}-{}-{route_id}", date_str(date)),
        }
    }
}

/// cache key of a trip-time or wait-time artifact
pub fn stat_cache_key(
    agency_id: &str,
    date: &NaiveDate,
    stat_group: &StatGroup,
    time_window: Option<&TimeWindow>,
) -> String {
    let time_str = time_window.map(|w| w.cache_suffix()).unwrap_or_default();
    format!("{agency_id}-{}{time_str}-{stat_group}", date_str(date))
}

/// public HTTP endpoint of an S3 bucket
pub fn bucket_url(bucket: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com")
}

fn time_range_path(time_window: Option<&TimeWindow>) -> Result<String, ArtifactPathError> {
    let time_path = time_window.map(|w| w.time_path()).unwrap_or_default();
    validate_time_range_path(&time_path)?;
    Ok(time_path)
}

fn date_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_path(date: &NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}
