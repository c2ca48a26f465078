use super::loader::yaml_with_env_overrides;
use super::{validate_agency_id, AgencyConfig, AgencyConfigError, CONFIG_YAML_ENV_VAR};
use opentransit_core::artifact::{ArtifactVersions, StatGroup, DEFAULT_S3_BUCKET};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// top-level dashboard configuration: where artifacts live, where the
/// metrics service runs, and which agencies are available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub s3_bucket: String,
    pub metrics_api_url: String,
    pub versions: ArtifactVersions,
    pub stat_groups: PrefetchStatGroups,
    /// directory keeping decompressed copies of fetched artifacts
    pub cache_dir: Option<PathBuf>,
    pub agencies: Vec<AgencyConfig>,
}

/// stat groups fetched for every agency/date/time window selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchStatGroups {
    pub trip_times: Vec<StatGroup>,
    pub wait_times: Vec<StatGroup>,
}

impl Default for PrefetchStatGroups {
    fn default() -> Self {
        Self {
            trip_times: vec![StatGroup::Median, StatGroup::P10MedianP90],
            wait_times: vec![StatGroup::Median, StatGroup::Plt20m],
        }
    }
}

#[derive(Deserialize)]
struct DashboardConfigHeader {
    #[serde(default = "default_s3_bucket")]
    s3_bucket: String,
    #[serde(default = "default_metrics_api_url")]
    metrics_api_url: String,
    #[serde(default)]
    versions: ArtifactVersions,
    #[serde(default)]
    stat_groups: PrefetchStatGroups,
    #[serde(default)]
    cache_dir: Option<PathBuf>,
    #[serde(default)]
    agencies: Vec<AgencyEntry>,
}

/// an agency is either defined inline (it has a provider) or refers to
/// `<agency_dir>/<id>.yaml`
#[derive(Deserialize)]
struct AgencyEntry {
    id: String,
    #[serde(default)]
    provider: Option<String>,
}

fn default_s3_bucket() -> String {
    String::from(DEFAULT_S3_BUCKET)
}

fn default_metrics_api_url() -> String {
    String::from("http://localhost:5000/api/graphql")
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            s3_bucket: default_s3_bucket(),
            metrics_api_url: default_metrics_api_url(),
            versions: ArtifactVersions::default(),
            stat_groups: PrefetchStatGroups::default(),
            cache_dir: None,
            agencies: vec![],
        }
    }
}

impl DashboardConfig {
    /// reads the configuration from YAML text. referenced agencies are
    /// loaded from `agency_dir`.
    pub fn from_yaml_str(yaml: &str, agency_dir: Option<&Path>) -> Result<Self, AgencyConfigError> {
        let config = yaml_with_env_overrides(yaml)?;
        let header: DashboardConfigHeader = config.clone().try_deserialize()?;

        let mut agencies = Vec::with_capacity(header.agencies.len());
        for (idx, entry) in header.agencies.iter().enumerate() {
            validate_agency_id(&entry.id)?;
            let agency = match (&entry.provider, agency_dir) {
                (Some(_), _) => {
                    let agency: AgencyConfig = config.get(&format!("agencies[{idx}]"))?;
                    agency.validate()?;
                    agency
                }
                (None, Some(dir)) => {
                    let path = dir.join(format!("{}.yaml", entry.id));
                    let agency = AgencyConfig::try_from(path.as_path())?;
                    if agency.id != entry.id {
                        return Err(AgencyConfigError::ConfigurationError(format!(
                            "{} defines agency '{}', expected '{}'",
                            path.to_string_lossy(),
                            agency.id,
                            entry.id
                        )));
                    }
                    agency
                }
                (None, None) => {
                    return Err(AgencyConfigError::ConfigurationError(format!(
                        "agency {} has no provider and no agency directory was given",
                        entry.id
                    )))
                }
            };
            agencies.push(agency);
        }

        log::debug!(
            "loaded dashboard configuration with agencies [{}]",
            agencies
                .iter()
                .map(|a| a.id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            s3_bucket: header.s3_bucket,
            metrics_api_url: header.metrics_api_url,
            versions: header.versions,
            stat_groups: header.stat_groups,
            cache_dir: header.cache_dir,
            agencies,
        })
    }

    /// reads a YAML file. referenced agencies are loaded from the `agencies`
    /// directory next to it.
    pub fn from_file(path: &Path) -> Result<Self, AgencyConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            AgencyConfigError::ConfigurationError(format!(
                "failure reading {}: {e}",
                path.to_string_lossy()
            ))
        })?;
        let agency_dir = path
            .parent()
            .map(|p| p.join("agencies"))
            .unwrap_or_else(|| PathBuf::from("agencies"));
        Self::from_yaml_str(&yaml, Some(&agency_dir))
    }

    /// reads the YAML held by the `OPENTRANSIT_CONFIG_YAML` environment variable
    pub fn from_env(agency_dir: Option<&Path>) -> Result<Self, AgencyConfigError> {
        let yaml = std::env::var(CONFIG_YAML_ENV_VAR).map_err(|_| {
            AgencyConfigError::ConfigurationError(format!(
                "{CONFIG_YAML_ENV_VAR} environment variable not defined"
            ))
        })?;
        Self::from_yaml_str(&yaml, agency_dir)
    }

    pub fn agency(&self, agency_id: &str) -> Result<&AgencyConfig, AgencyConfigError> {
        self.agencies
            .iter()
            .find(|a| a.id == agency_id)
            .ok_or_else(|| AgencyConfigError::UnknownAgency(agency_id.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::DashboardConfig;
    use crate::config::{AgencyConfigError, AgencyProvider, CONFIG_YAML_ENV_VAR};
    use opentransit_core::artifact::StatGroup;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    /// every load reads OPENTRANSIT_* variables, which are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn test_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test")
    }

    #[test]
    fn test_load_file_with_inline_and_referenced_agencies() {
        let _env = env_lock();
        let config = DashboardConfig::from_file(&test_dir().join("dashboard.yaml"))
            .expect("test configuration should load");
        assert_eq!(config.s3_bucket, "opentransit-data");
        assert_eq!(config.versions.trip_times, "v1a");
        assert_eq!(config.versions.routes, "v3b");
        assert_eq!(config.agencies.len(), 2);

        let muni = config.agency("muni").unwrap();
        assert_eq!(muni.provider, AgencyProvider::Nextbus);
        assert_eq!(muni.nextbus_agency_id.as_deref(), Some("sf-muni"));
        assert!(muni.is_route_ignored("S"));
        assert!(!muni.is_route_ignored("N"));
        assert_eq!(muni.day_start_hour(Some("NX")), 5);
        assert_eq!(muni.custom_directions_for("KT", "0").len(), 2);
        assert!(muni.display.is_route_disabled("PM"));
        assert!(muni.display.service_area_contains(-122.45, 37.76));

        let trimet = config.agency("trimet").unwrap();
        assert_eq!(trimet.provider, AgencyProvider::Gtfs);
        assert_eq!(trimet.route_id_gtfs_field, "route_id");
        assert_eq!(trimet.default_day_start_hour, 3);
    }

    #[test]
    fn test_defaults() {
        let _env = env_lock();
        let config = DashboardConfig::from_yaml_str("agencies: []\n", None).unwrap();
        assert_eq!(config.s3_bucket, "opentransit-data");
        assert_eq!(
            config.stat_groups.trip_times,
            vec![StatGroup::Median, StatGroup::P10MedianP90]
        );
        assert!(config.agencies.is_empty());
        assert!(matches!(
            config.agency("muni"),
            Err(AgencyConfigError::UnknownAgency(_))
        ));
    }

    #[test]
    fn test_invalid_agency_id_rejected() {
        let _env = env_lock();
        let yaml = "agencies:\n  - id: ../muni\n";
        let result = DashboardConfig::from_yaml_str(yaml, Some(&test_dir().join("agencies")));
        assert!(matches!(result, Err(AgencyConfigError::InvalidAgencyId(_))));
    }

    #[test]
    fn test_reference_without_agency_dir() {
        let _env = env_lock();
        let yaml = "agencies:\n  - id: muni\n";
        assert!(DashboardConfig::from_yaml_str(yaml, None).is_err());
    }

    #[test]
    fn test_stat_groups_override() {
        let _env = env_lock();
        let yaml = "stat_groups:\n  trip_times: [median]\n  wait_times: [p10-median-p90]\n";
        let config = DashboardConfig::from_yaml_str(yaml, None).unwrap();
        assert_eq!(config.stat_groups.trip_times, vec![StatGroup::Median]);
        assert_eq!(config.stat_groups.wait_times, vec![StatGroup::P10MedianP90]);
        assert_eq!(config.cache_dir, None);
    }

    #[test]
    fn test_cache_dir() {
        let _env = env_lock();
        let config = DashboardConfig::from_yaml_str("cache_dir: /var/cache/opentransit\n", None).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/opentransit")));
    }

    #[test]
    fn test_from_env_with_overrides() {
        let _env = env_lock();
        std::env::remove_var(CONFIG_YAML_ENV_VAR);
        assert!(matches!(
            DashboardConfig::from_env(None),
            Err(AgencyConfigError::ConfigurationError(_))
        ));

        std::env::set_var(CONFIG_YAML_ENV_VAR, "s3_bucket: from-yaml\nagencies: []\n");
        let config = DashboardConfig::from_env(None);
        assert_eq!(config.unwrap().s3_bucket, "from-yaml");

        std::env::set_var("OPENTRANSIT_S3_BUCKET", "from-env");
        std::env::set_var("OPENTRANSIT_VERSIONS__TRIP_TIMES", "v2");
        let config = DashboardConfig::from_env(None);
        std::env::remove_var(CONFIG_YAML_ENV_VAR);
        std::env::remove_var("OPENTRANSIT_S3_BUCKET");
        std::env::remove_var("OPENTRANSIT_VERSIONS__TRIP_TIMES");

        let config = config.unwrap();
        assert_eq!(config.s3_bucket, "from-env");
        assert_eq!(config.versions.trip_times, "v2");
        assert_eq!(config.versions.wait_times, "v1b");
    }
}
