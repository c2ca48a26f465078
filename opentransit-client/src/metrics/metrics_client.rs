use opentransit_core::model::GraphParams;
use reqwest::StatusCode;
use serde_json::json;

use super::metrics_response::{GraphQlResponse, RouteMetricsData};
use super::{MetricsError, MetricsQueryVariables, TripMetrics, TRIP_METRICS_QUERY};

/// posts the trip metrics query to the metrics service
#[derive(Debug, Clone)]
pub struct MetricsClient {
    client: reqwest::Client,
    url: String,
}

impl MetricsClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self, params: &GraphParams) -> Result<TripMetrics, MetricsError> {
        let variables = MetricsQueryVariables::try_from(params)?;
        let body = json!({
            "query": TRIP_METRICS_QUERY,
            "variables": variables,
        });
        log::debug!("POST {} for route {}", self.url, variables.route_id);
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MetricsError::TransportError(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MetricsError::TransportError(e.to_string()))?;
        interpret_response(status, &text)
    }
}

/// turns a metrics service response into trip metrics. the first
/// server-supplied GraphQL error message wins over the HTTP status.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<TripMetrics, MetricsError> {
    let parsed = serde_json::from_str::<GraphQlResponse<RouteMetricsData>>(body);
    if let Ok(response) = &parsed {
        if let Some(error) = response.errors.first() {
            return Err(MetricsError::ServerError(error.message.clone()));
        }
    }
    if !status.is_success() {
        return Err(MetricsError::TransportError(format!("HTTP status {status}")));
    }
    let response = parsed.map_err(|e| MetricsError::DecodeError(e.to_string()))?;
    response
        .data
        .and_then(|d| d.route_metrics)
        .and_then(|m| m.trip)
        .ok_or_else(|| MetricsError::DecodeError(String::from("response has no trip metrics")))
}
