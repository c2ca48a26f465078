use super::{AgencyConfig, AgencyConfigError};
use config::{Config, Environment, File, FileFormat};
use opentransit_core::artifact::validate_path_component;
use std::path::Path;

/// prefix of environment variables overriding dashboard settings, e.g.
/// `OPENTRANSIT_S3_BUCKET`
pub const ENV_PREFIX: &str = "OPENTRANSIT";

/// environment variable holding the whole dashboard configuration as YAML
pub const CONFIG_YAML_ENV_VAR: &str = "OPENTRANSIT_CONFIG_YAML";

/// agency ids name configuration files and object keys
pub fn validate_agency_id(agency_id: &str) -> Result<(), AgencyConfigError> {
    validate_path_component("agency id", agency_id)
        .map(|_| ())
        .map_err(|_| AgencyConfigError::InvalidAgencyId(agency_id.to_string()))
}

/// YAML text layered with `OPENTRANSIT_*` environment overrides
pub(crate) fn yaml_with_env_overrides(yaml: &str) -> Result<Config, AgencyConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    Ok(config)
}

impl TryFrom<&Path> for AgencyConfig {
    type Error = AgencyConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let f = path.to_string_lossy();
        if !path.is_file() {
            return Err(AgencyConfigError::ConfigurationError(format!(
                "failure reading {f}: not a file"
            )));
        }
        log::debug!("reading agency configuration from {f}");
        let agency: AgencyConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        agency.validate()?;
        Ok(agency)
    }
}
