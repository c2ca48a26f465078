use super::ArtifactKind;
use serde::{Deserialize, Serialize};

/// version segment embedded in the object key of each artifact kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactVersions {
    pub routes: String,
    pub trip_times: String,
    pub wait_times: String,
    pub arrivals: String,
}

impl Default for ArtifactVersions {
    fn default() -> Self {
        Self {
            routes: String::from("v3a"),
            trip_times: String::from("v1a"),
            wait_times: String::from("v1b"),
            arrivals: String::from("v4"),
        }
    }
}

impl ArtifactVersions {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Routes => &self.routes,
            ArtifactKind::TripTimes => &self.trip_times,
            ArtifactKind::WaitTimes => &self.wait_times,
            ArtifactKind::Arrivals => &self.arrivals,
        }
    }
}
