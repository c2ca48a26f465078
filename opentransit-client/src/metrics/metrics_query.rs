use chrono::NaiveDate;
use opentransit_core::model::GraphParams;
use serde::{Deserialize, Serialize};

use super::MetricsError;

/// trip-level headway, wait time and trip time metrics for one route, stop
/// pair and interval, plus summaries per time range of the day.
pub const TRIP_METRICS_QUERY: &str = r#"
query($agencyId: String!, $routeId: String!, $startStopId: String!, $endStopId: String,
      $directionId: String, $date: String, $startTime: String, $endTime: String) {
  routeMetrics(agencyId: $agencyId, routeId: $routeId) {
    trip(startStopId: $startStopId, endStopId: $endStopId, directionId: $directionId) {
      interval(dates: [$date], startTime: $startTime, endTime: $endTime) {
        headways {
          count avg min median max
          percentiles(percentiles: [10, 50, 90]) { percentile value }
          histogram { binStart binEnd count }
        }
        waitTimes {
          count avg min median max
          percentiles(percentiles: [10, 50, 90]) { percentile value }
          histogram { binStart binEnd count }
        }
        tripTimes {
          count avg min median max
          percentiles(percentiles: [10, 50, 90]) { percentile value }
          histogram { binStart binEnd count }
        }
      }
      timeRanges(dates: [$date]) {
        startTime endTime
        waitTimes { median percentiles(percentiles: [90]) { percentile value } }
        tripTimes { median percentiles(percentiles: [10, 90]) { percentile value } }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQueryVariables {
    pub agency_id: String,
    pub route_id: String,
    pub start_stop_id: String,
    pub end_stop_id: String,
    pub direction_id: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl TryFrom<&GraphParams> for MetricsQueryVariables {
    type Error = MetricsError;

    fn try_from(params: &GraphParams) -> Result<Self, Self::Error> {
        fn required(value: &Option<String>, name: &'static str) -> Result<String, MetricsError> {
            value.clone().ok_or(MetricsError::IncompleteSelection(name))
        }
        let time_window = params.time_window()?;
        Ok(Self {
            agency_id: required(&params.agency_id, "agency")?,
            route_id: required(&params.route_id, "route")?,
            start_stop_id: required(&params.start_stop_id, "start stop")?,
            end_stop_id: required(&params.end_stop_id, "end stop")?,
            direction_id: required(&params.direction_id, "direction")?,
            date: params.date,
            start_time: time_window.as_ref().map(|w| w.start_time().to_string()),
            end_time: time_window.as_ref().map(|w| w.end_time().to_string()),
        })
    }
}
