use crate::metrics::TripMetrics;

/// latest trip metrics response for the selected stop pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsState {
    pub loading: bool,
    pub data: Option<TripMetrics>,
    /// display-only error message
    pub error: Option<String>,
}
