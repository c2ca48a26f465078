use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// observed arrivals of one route on one service date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalsArtifact {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// stop id -> arrivals at that stop
    pub stops: HashMap<String, StopArrivals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopArrivals {
    /// direction id -> arrival events in time order
    pub arrivals: HashMap<String, Vec<ArrivalEvent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalEvent {
    /// arrival time, unix seconds
    #[serde(rename = "t")]
    pub time: i64,
    /// departure time, unix seconds
    #[serde(rename = "e", default)]
    pub departure_time: Option<i64>,
    #[serde(rename = "v")]
    pub vehicle_id: String,
    #[serde(rename = "i", default)]
    pub trip_index: Option<u32>,
    #[serde(rename = "d", default)]
    pub distance: Option<f64>,
}

impl ArrivalsArtifact {
    pub fn arrivals_at(&self, stop_id: &str, direction_id: &str) -> &[ArrivalEvent] {
        self.stops
            .get(stop_id)
            .and_then(|s| s.arrivals.get(direction_id))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// total number of arrival events across all stops and directions
    pub fn len(&self) -> usize {
        self.stops
            .values()
            .flat_map(|s| s.arrivals.values())
            .map(|events| events.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
