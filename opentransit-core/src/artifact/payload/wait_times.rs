use super::StatValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// precomputed wait times at each stop for one agency, date, stat group and
/// time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitTimesArtifact {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// route id -> direction id -> stop id -> value
    pub routes: HashMap<String, HashMap<String, HashMap<String, StatValue>>>,
}

impl WaitTimesArtifact {
    pub fn get_value(&self, route_id: &str, direction_id: &str, stop_id: &str) -> Option<&StatValue> {
        self.routes.get(route_id)?.get(direction_id)?.get(stop_id)
    }
}
