use crate::artifact::StatGroup;
use serde::{Deserialize, Serialize};

/// a statistic stored in a trip-time or wait-time artifact. single-stat
/// groups store a number, multi-stat groups an array ordered like the group
/// name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Single(f64),
    Multiple(Vec<f64>),
    Missing,
}

impl StatValue {
    /// reads one statistic of the group, e.g. `median` from a
    /// `p10-median-p90` value.
    pub fn component(&self, stat_group: &StatGroup, name: &str) -> Option<f64> {
        let idx = stat_group.component_index(name)?;
        match self {
            StatValue::Single(v) if idx == 0 => Some(*v),
            StatValue::Multiple(values) => values.get(idx).copied(),
            _ => None,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        match self {
            StatValue::Single(v) => vec![*v],
            StatValue::Multiple(values) => values.clone(),
            StatValue::Missing => vec![],
        }
    }
}
