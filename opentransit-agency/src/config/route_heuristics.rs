use serde::{Deserialize, Serialize};

/// per-route adjustments applied by systemwide metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHeuristics {
    pub route_id: String,
    /// exclude the route from systemwide per-route computations
    #[serde(default)]
    pub ignore_route: bool,
    #[serde(default)]
    pub directions: Vec<DirectionHeuristics>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionHeuristics {
    pub direction_id: String,
    #[serde(default)]
    pub ignore_first_stop: bool,
    #[serde(default)]
    pub ignore_last_stop: bool,
    /// replaces the first stop of the direction for end-to-end metrics
    #[serde(default)]
    pub first_stop_id: Option<String>,
    #[serde(default)]
    pub last_stop_id: Option<String>,
}

impl RouteHeuristics {
    pub fn direction(&self, direction_id: &str) -> Option<&DirectionHeuristics> {
        self.directions.iter().find(|d| d.direction_id == direction_id)
    }
}

impl DirectionHeuristics {
    /// end-to-end stop pair of a direction after applying these overrides.
    /// None when the remaining sequence has no distinct pair of stops.
    pub fn endpoints(&self, stops: &[String]) -> Option<(String, String)> {
        let skip_first = usize::from(self.ignore_first_stop);
        let skip_last = usize::from(self.ignore_last_stop);
        if stops.len() < 2 + skip_first + skip_last {
            return None;
        }
        let first = self
            .first_stop_id
            .clone()
            .unwrap_or_else(|| stops[skip_first].clone());
        let last = self
            .last_stop_id
            .clone()
            .unwrap_or_else(|| stops[stops.len() - 1 - skip_last].clone());
        if first == last {
            None
        } else {
            Some((first, last))
        }
    }
}
