use super::ArtifactPathError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}(\+1)?$").expect("time of day regex is valid"));

/// a time window within a service day. times are `HH:MM`, with a `+1`
/// suffix for times after midnight that belong to the previous service day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start_time: String,
    end_time: String,
}

impl TimeWindow {
    pub fn new(start_time: &str, end_time: &str) -> Result<Self, ArtifactPathError> {
        for t in [start_time, end_time] {
            if !TIME_OF_DAY.is_match(t) {
                return Err(ArtifactPathError::InvalidTimeOfDay(t.to_string()));
            }
        }
        Ok(Self {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        })
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// object key suffix, e.g. `_0700_1900`
    pub fn time_path(&self) -> String {
        format!(
            "_{}_{}",
            self.start_time.replace(':', ""),
            self.end_time.replace(':', "")
        )
    }

    /// cache key suffix appended to the date, e.g. `+07:00-19:00`
    pub fn cache_suffix(&self) -> String {
        format!("+{}-{}", self.start_time, self.end_time)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}
