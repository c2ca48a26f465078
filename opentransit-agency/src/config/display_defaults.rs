use geo::{Contains, Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

/// map display defaults for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayDefaults {
    #[serde(default)]
    pub initial_map_center: Option<LonLat>,
    #[serde(default)]
    pub initial_map_zoom: Option<u8>,
    /// routes hidden from the map until enabled
    #[serde(default)]
    pub default_disabled_routes: Vec<String>,
    /// exterior ring of the service area polygon
    #[serde(default)]
    pub service_area: Vec<LonLat>,
}

impl DisplayDefaults {
    pub fn service_area_polygon(&self) -> Option<Polygon<f64>> {
        if self.service_area.len() < 3 {
            return None;
        }
        let ring: LineString<f64> = self
            .service_area
            .iter()
            .map(|p| Coord { x: p.lon, y: p.lat })
            .collect();
        Some(Polygon::new(ring, vec![]))
    }

    /// true if the point lies in the service area. without a service area
    /// every point is accepted.
    pub fn service_area_contains(&self, lon: f64, lat: f64) -> bool {
        match self.service_area_polygon() {
            Some(polygon) => polygon.contains(&Point::new(lon, lat)),
            None => true,
        }
    }

    pub fn is_route_disabled(&self, route_id: &str) -> bool {
        self.default_disabled_routes.iter().any(|r| r == route_id)
    }
}

#[cfg(test)]
mod test {
    use super::{DisplayDefaults, LonLat};

    #[test]
    fn test_service_area_contains() {
        let square = [(-123.0, 37.0), (-122.0, 37.0), (-122.0, 38.0), (-123.0, 38.0)];
        let defaults = DisplayDefaults {
            service_area: square.iter().map(|(lon, lat)| LonLat { lon: *lon, lat: *lat }).collect(),
            ..Default::default()
        };
        assert!(defaults.service_area_contains(-122.45, 37.76));
        assert!(!defaults.service_area_contains(-121.0, 37.5));
        assert!(DisplayDefaults::default().service_area_contains(0.0, 0.0));
    }
}
