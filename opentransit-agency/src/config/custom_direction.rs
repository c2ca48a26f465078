use serde::{Deserialize, Serialize};

/// custom directions defined for one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCustomDirections {
    pub route_id: String,
    pub directions: Vec<CustomDirection>,
}

/// a logical direction carved out of a GTFS direction. trips of the GTFS
/// direction belong to it when they serve every included stop and none of the
/// excluded stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDirection {
    pub id: String,
    pub title: String,
    pub gtfs_direction_id: String,
    #[serde(default)]
    pub included_stop_ids: Vec<String>,
    #[serde(default)]
    pub excluded_stop_ids: Vec<String>,
}

impl CustomDirection {
    pub fn matches<S: AsRef<str>>(&self, stop_ids: &[S]) -> bool {
        let serves = |id: &String| stop_ids.iter().any(|s| s.as_ref() == id);
        self.included_stop_ids.iter().all(serves) && !self.excluded_stop_ids.iter().any(serves)
    }
}
