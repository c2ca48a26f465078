use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// one direction of a route. `stops` is the ordered stop sequence of the
/// direction; custom direction splits show up here as additional directions
/// with their own ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub id: String,
    pub title: String,
    pub stops: Vec<String>,
    #[serde(default)]
    pub gtfs_shape_id: Option<String>,
    /// total length of the GTFS shape in meters
    #[serde(default)]
    pub distance: Option<u64>,
    #[serde(default)]
    pub coords: Vec<Coord>,
    #[serde(default)]
    pub stop_geometry: HashMap<String, StopGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// location of a stop along the direction's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopGeometry {
    /// cumulative distance in meters along the shape
    pub distance: u64,
    /// index of the last shape coordinate before the stop
    pub after_index: usize,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl Direction {
    /// position of a stop in this direction's ordered sequence
    pub fn stop_index(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|s| s == stop_id)
    }

    pub fn contains_stop(&self, stop_id: &str) -> bool {
        self.stop_index(stop_id).is_some()
    }

    /// the stops strictly downstream of `stop_id`. a stop that is not served
    /// by this direction has no downstream stops.
    pub fn stops_after(&self, stop_id: &str) -> &[String] {
        match self.stop_index(stop_id) {
            Some(idx) => &self.stops[idx + 1..],
            None => &[],
        }
    }

    /// true if both stops are served and `from` comes before `to`.
    pub fn is_ordered_pair(&self, from: &str, to: &str) -> bool {
        match (self.stop_index(from), self.stop_index(to)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}
