use super::StatValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

type ToStopValues = HashMap<String, StatValue>;
type FromStopValues = HashMap<String, ToStopValues>;
type DirectionValues = HashMap<String, FromStopValues>;

/// precomputed trip times between stop pairs for one agency, date, stat
/// group and time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripTimesArtifact {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// route id -> direction id -> from stop id -> to stop id -> value
    pub routes: HashMap<String, DirectionValues>,
}

impl TripTimesArtifact {
    pub fn get_value(
        &self,
        route_id: &str,
        direction_id: &str,
        start_stop_id: &str,
        end_stop_id: &str,
    ) -> Option<&StatValue> {
        self.routes
            .get(route_id)?
            .get(direction_id)?
            .get(start_stop_id)?
            .get(end_stop_id)
    }

    /// all destination values from one stop, as used to color a route map
    pub fn get_values_from(
        &self,
        route_id: &str,
        direction_id: &str,
        start_stop_id: &str,
    ) -> Option<&HashMap<String, StatValue>> {
        self.routes
            .get(route_id)?
            .get(direction_id)?
            .get(start_stop_id)
    }
}
