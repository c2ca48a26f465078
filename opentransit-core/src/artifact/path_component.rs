use super::ArtifactPathError;
use regex::Regex;
use std::sync::LazyLock;

static PATH_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\-]+$").expect("path component regex is valid"));

static TIME_RANGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\-\+]*$").expect("time range regex is valid"));

/// agency ids, versions, stat groups and route ids are embedded in object
/// keys and cache keys, so they are restricted to word characters and dashes.
pub fn validate_path_component<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ArtifactPathError> {
    if PATH_COMPONENT.is_match(value) {
        Ok(value)
    } else {
        Err(ArtifactPathError::InvalidComponent {
            field,
            value: value.to_string(),
        })
    }
}

/// the time window suffix of a file name, empty for the whole day
pub fn validate_time_range_path(value: &str) -> Result<&str, ArtifactPathError> {
    if TIME_RANGE_PATH.is_match(value) {
        Ok(value)
    } else {
        Err(ArtifactPathError::InvalidComponent {
            field: "time range",
            value: value.to_string(),
        })
    }
}
