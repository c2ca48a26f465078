use super::{
    validate_agency_id, AgencyConfigError, AgencyProvider, CustomDayStartHour, CustomDirection,
    DisplayDefaults, RouteCustomDirections, RouteHeuristics,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use opentransit_core::model::{Direction, Route};
use serde::{Deserialize, Serialize};

/// per-agency configuration, shared with the backend jobs that precompute
/// the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyConfig {
    pub id: String,
    pub provider: AgencyProvider,
    pub timezone_id: String,
    #[serde(default)]
    pub gtfs_url: Option<String>,
    /// filters the routes of a multi-agency GTFS feed
    #[serde(default)]
    pub gtfs_agency_id: Option<String>,
    /// GTFS routes.txt field used as the route id, e.g. route_short_name
    #[serde(default = "default_route_id_gtfs_field")]
    pub route_id_gtfs_field: String,
    #[serde(default)]
    pub nextbus_agency_id: Option<String>,
    #[serde(default = "default_day_start_hour")]
    pub default_day_start_hour: u32,
    #[serde(default)]
    pub custom_day_start_hours: Vec<CustomDayStartHour>,
    #[serde(default)]
    pub custom_directions: Vec<RouteCustomDirections>,
    #[serde(default)]
    pub route_heuristics: Vec<RouteHeuristics>,
    #[serde(default)]
    pub display: DisplayDefaults,
}

fn default_route_id_gtfs_field() -> String {
    String::from("route_id")
}

/// trips between midnight and 3 AM belong to the previous service day
fn default_day_start_hour() -> u32 {
    3
}

impl AgencyConfig {
    pub fn validate(&self) -> Result<(), AgencyConfigError> {
        validate_agency_id(&self.id)?;
        self.timezone()?;
        if self.provider == AgencyProvider::Nextbus && self.nextbus_agency_id.is_none() {
            return Err(AgencyConfigError::MissingField {
                agency_id: self.id.clone(),
                field: "nextbus_agency_id",
            });
        }
        let hours = std::iter::once(self.default_day_start_hour)
            .chain(self.custom_day_start_hours.iter().map(|c| c.start_hour));
        for hour in hours {
            if hour > 23 {
                return Err(AgencyConfigError::InvalidDayStartHour {
                    agency_id: self.id.clone(),
                    hour,
                });
            }
        }
        Ok(())
    }

    pub fn timezone(&self) -> Result<Tz, AgencyConfigError> {
        self.timezone_id
            .parse::<Tz>()
            .map_err(|e| AgencyConfigError::InvalidTimezone {
                agency_id: self.id.clone(),
                timezone_id: self.timezone_id.clone(),
                message: e.to_string(),
            })
    }

    /// hour of the day when the service day starts for a route
    pub fn day_start_hour(&self, route_id: Option<&str>) -> u32 {
        route_id
            .and_then(|id| {
                self.custom_day_start_hours
                    .iter()
                    .find(|c| c.routes.iter().any(|r| r == id))
            })
            .map(|c| c.start_hour)
            .unwrap_or(self.default_day_start_hour)
    }

    /// service date of an instant in the agency's time zone. instants before
    /// the day start hour belong to the previous service date.
    pub fn service_date(
        &self,
        instant: DateTime<Utc>,
        route_id: Option<&str>,
    ) -> Result<NaiveDate, AgencyConfigError> {
        let tz = self.timezone()?;
        let local = instant.with_timezone(&tz);
        let shifted = local - Duration::hours(i64::from(self.day_start_hour(route_id)));
        Ok(shifted.date_naive())
    }

    pub fn route_heuristics(&self, route_id: &str) -> Option<&RouteHeuristics> {
        self.route_heuristics.iter().find(|h| h.route_id == route_id)
    }

    pub fn is_route_ignored(&self, route_id: &str) -> bool {
        self.route_heuristics(route_id)
            .map(|h| h.ignore_route)
            .unwrap_or(false)
    }

    /// routes that take part in systemwide per-route computations
    pub fn systemwide_routes<'a>(&self, routes: &'a [Route]) -> Vec<&'a Route> {
        routes
            .iter()
            .filter(|r| {
                let ignored = self.is_route_ignored(&r.id);
                if ignored {
                    log::debug!("agency {}: route {} ignored in systemwide metrics", self.id, r.id);
                }
                !ignored
            })
            .collect()
    }

    /// first and last stop of a direction for end-to-end metrics, after the
    /// direction's heuristic overrides
    pub fn direction_endpoints(&self, route: &Route, direction: &Direction) -> Option<(String, String)> {
        let heuristics = self
            .route_heuristics(&route.id)
            .and_then(|h| h.direction(&direction.id))
            .cloned()
            .unwrap_or_default();
        heuristics.endpoints(&direction.stops)
    }

    /// custom directions split from one GTFS direction of a route
    pub fn custom_directions_for(
        &self,
        route_id: &str,
        gtfs_direction_id: &str,
    ) -> Vec<&CustomDirection> {
        self.custom_directions
            .iter()
            .filter(|c| c.route_id == route_id)
            .flat_map(|c| c.directions.iter())
            .filter(|d| d.gtfs_direction_id == gtfs_direction_id)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::AgencyConfig;
    use crate::config::{
        AgencyProvider, CustomDayStartHour, CustomDirection, DirectionHeuristics, DisplayDefaults,
        RouteCustomDirections, RouteHeuristics,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use opentransit_core::model::{Direction, Route};
    use std::collections::HashMap;

    fn agency() -> AgencyConfig {
        AgencyConfig {
            id: String::from("muni"),
            provider: AgencyProvider::Nextbus,
            timezone_id: String::from("America/Los_Angeles"),
            gtfs_url: None,
            gtfs_agency_id: None,
            route_id_gtfs_field: String::from("route_short_name"),
            nextbus_agency_id: Some(String::from("sf-muni")),
            default_day_start_hour: 3,
            custom_day_start_hours: vec![CustomDayStartHour {
                start_hour: 5,
                routes: vec![String::from("NX")],
            }],
            custom_directions: vec![RouteCustomDirections {
                route_id: String::from("KT"),
                directions: vec![CustomDirection {
                    id: String::from("0-K"),
                    title: String::from("Outbound K"),
                    gtfs_direction_id: String::from("0"),
                    included_stop_ids: vec![String::from("K1")],
                    excluded_stop_ids: vec![],
                }],
            }],
            route_heuristics: vec![
                RouteHeuristics {
                    route_id: String::from("S"),
                    ignore_route: true,
                    directions: vec![],
                },
                RouteHeuristics {
                    route_id: String::from("J"),
                    ignore_route: false,
                    directions: vec![DirectionHeuristics {
                        direction_id: String::from("1"),
                        ignore_first_stop: true,
                        ..Default::default()
                    }],
                },
            ],
            display: DisplayDefaults::default(),
        }
    }

    fn route(id: &str) -> Route {
        Route {
            id: id.to_string(),
            title: id.to_string(),
            url: None,
            route_type: None,
            gtfs_route_id: None,
            sort_order: None,
            directions: vec![Direction {
                id: String::from("1"),
                title: String::from("Inbound"),
                stops: vec![String::from("A"), String::from("B"), String::from("C")],
                gtfs_shape_id: None,
                distance: None,
                coords: vec![],
                stop_geometry: HashMap::new(),
            }],
            stops: HashMap::new(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(agency().validate().is_ok());
        let mut bad = agency();
        bad.nextbus_agency_id = None;
        assert!(bad.validate().is_err());
        let mut bad = agency();
        bad.timezone_id = String::from("Mars/Olympus_Mons");
        assert!(bad.validate().is_err());
        let mut bad = agency();
        bad.id = String::from("muni/../x");
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_ignored_route_excluded_from_systemwide_routes() {
        let routes = vec![route("J"), route("S"), route("N")];
        let a = agency();
        assert!(a.is_route_ignored("S"));
        let systemwide = a.systemwide_routes(&routes);
        let ids: Vec<&str> = systemwide.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["J", "N"]);
    }

    #[test]
    fn test_direction_endpoints() {
        let a = agency();
        let j = route("J");
        assert_eq!(
            a.direction_endpoints(&j, &j.directions[0]),
            Some((String::from("B"), String::from("C")))
        );
        let n = route("N");
        assert_eq!(
            a.direction_endpoints(&n, &n.directions[0]),
            Some((String::from("A"), String::from("C")))
        );
    }

    #[test]
    fn test_service_date_uses_day_start_hour() {
        let a = agency();
        // 2020-01-16 01:30 in San Francisco (UTC-8)
        let instant = Utc.with_ymd_and_hms(2020, 1, 16, 9, 30, 0).unwrap();
        assert_eq!(
            a.service_date(instant, Some("1")).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
        );
        // 04:00 local is the new service day for most routes, but not for NX
        let instant = Utc.with_ymd_and_hms(2020, 1, 16, 12, 0, 0).unwrap();
        assert_eq!(
            a.service_date(instant, None).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 16).unwrap()
        );
        assert_eq!(
            a.service_date(instant, Some("NX")).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_custom_directions_for() {
        let a = agency();
        assert_eq!(a.custom_directions_for("KT", "0").len(), 1);
        assert!(a.custom_directions_for("KT", "1").is_empty());
        assert!(a.custom_directions_for("N", "0").is_empty());
    }
}
