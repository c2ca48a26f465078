use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgencyConfigError {
    #[error("failure reading configuration: {0}")]
    ConfigurationError(String),
    #[error("failure decoding configuration: {source}")]
    DecodeError {
        #[from]
        source: config::ConfigError,
    },
    #[error("invalid agency: {0}")]
    InvalidAgencyId(String),
    #[error("agency id {0} not defined in config")]
    UnknownAgency(String),
    #[error("agency {agency_id} is missing required field '{field}'")]
    MissingField {
        agency_id: String,
        field: &'static str,
    },
    #[error("agency {agency_id} has invalid timezone '{timezone_id}': {message}")]
    InvalidTimezone {
        agency_id: String,
        timezone_id: String,
        message: String,
    },
    #[error("agency {agency_id} has invalid day start hour {hour}, expected 0-23")]
    InvalidDayStartHour { agency_id: String, hour: u32 },
}
