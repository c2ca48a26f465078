use super::{Direction, Stop};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a route as exported by the route configuration job. immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    /// GTFS route_type
    #[serde(default, rename = "type")]
    pub route_type: Option<u32>,
    #[serde(default)]
    pub gtfs_route_id: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    pub directions: Vec<Direction>,
    pub stops: HashMap<String, Stop>,
}

impl Route {
    pub fn direction(&self, direction_id: &str) -> Option<&Direction> {
        self.directions.iter().find(|d| d.id == direction_id)
    }

    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.stops.get(stop_id)
    }

    /// display title of a stop, falling back to the stop id for stops
    /// missing from the route's stop table.
    pub fn stop_title<'a>(&'a self, stop_id: &'a str) -> &'a str {
        self.stops
            .get(stop_id)
            .map(|s| s.title.as_str())
            .unwrap_or(stop_id)
    }
}

/// finds a route by id within a loaded route list
pub fn find_route<'a>(routes: &'a [Route], route_id: &str) -> Option<&'a Route> {
    routes.iter().find(|r| r.id == route_id)
}
