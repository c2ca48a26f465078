mod metrics_client;
mod metrics_error;
mod metrics_query;
mod metrics_response;

pub use metrics_client::{interpret_response, MetricsClient};
pub use metrics_error::MetricsError;
pub use metrics_query::{MetricsQueryVariables, TRIP_METRICS_QUERY};
pub use metrics_response::{
    HistogramBin, IntervalMetrics, MetricSummary, PercentileValue, TimeRangeMetrics, TripMetrics,
};
