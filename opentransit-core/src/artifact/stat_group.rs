use super::{validate_path_component, ArtifactPathError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// a named bundle of summary statistics stored together in one artifact.
/// the name lists the statistics in the order they appear in each value,
/// e.g. `p10-median-p90` stores `[p10, median, p90]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatGroup {
    Median,
    P10MedianP90,
    /// probability (percent) of waiting less than 20 minutes
    Plt20m,
    Custom(String),
}

impl StatGroup {
    pub fn as_str(&self) -> &str {
        match self {
            StatGroup::Median => "median",
            StatGroup::P10MedianP90 => "p10-median-p90",
            StatGroup::Plt20m => "plt20m",
            StatGroup::Custom(name) => name,
        }
    }

    /// names of the statistics in this group, in storage order
    pub fn components(&self) -> Vec<&str> {
        self.as_str().split('-').collect()
    }

    /// storage index of a statistic within this group
    pub fn component_index(&self, name: &str) -> Option<usize> {
        self.components().iter().position(|c| *c == name)
    }
}

impl FromStr for StatGroup {
    type Err = ArtifactPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(StatGroup::Median),
            "p10-median-p90" => Ok(StatGroup::P10MedianP90),
            "plt20m" => Ok(StatGroup::Plt20m),
            other => validate_path_component("stat group", other)
                .map(|s| StatGroup::Custom(s.to_string()))
                .map_err(|_| ArtifactPathError::InvalidStatGroup(other.to_string())),
        }
    }
}

impl TryFrom<String> for StatGroup {
    type Error = ArtifactPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StatGroup::from_str(&value)
    }
}

impl From<StatGroup> for String {
    fn from(value: StatGroup) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for StatGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
