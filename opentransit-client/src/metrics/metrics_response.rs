use serde::{Deserialize, Serialize};

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RouteMetricsData {
    pub route_metrics: Option<RouteMetrics>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteMetrics {
    pub trip: Option<TripMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMetrics {
    pub interval: Option<IntervalMetrics>,
    #[serde(default)]
    pub time_ranges: Vec<TimeRangeMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalMetrics {
    pub headways: Option<MetricSummary>,
    pub wait_times: Option<MetricSummary>,
    pub trip_times: Option<MetricSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeMetrics {
    pub start_time: String,
    pub end_time: String,
    pub wait_times: Option<MetricSummary>,
    pub trip_times: Option<MetricSummary>,
}

/// summary statistics in minutes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSummary {
    pub count: Option<u64>,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<f64>,
    pub percentiles: Vec<PercentileValue>,
    pub histogram: Vec<HistogramBin>,
}

impl MetricSummary {
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| p.percentile == percentile)
            .and_then(|p| p.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub bin_start: f64,
    pub bin_end: f64,
    pub count: f64,
}
