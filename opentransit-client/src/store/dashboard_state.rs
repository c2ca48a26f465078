use opentransit_core::artifact::payload::{ArrivalsArtifact, TripTimesArtifact, WaitTimesArtifact};
use opentransit_core::artifact::{ArtifactKind, ArtifactRequest};
use opentransit_core::model::{GraphParams, Route};
use opentransit_core::selection::SelectionView;
use std::collections::HashMap;

use super::{Action, MetricsState};

/// the application state of the dashboard. response caches are keyed by the
/// cache key of the request; an entry, once present, is never replaced.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub graph_params: GraphParams,
    /// agency id -> routes
    pub routes: HashMap<String, Vec<Route>>,
    /// agency id -> route list fetch failure
    pub routes_errors: HashMap<String, String>,
    pub trip_times_cache: HashMap<String, TripTimesArtifact>,
    pub wait_times_cache: HashMap<String, WaitTimesArtifact>,
    pub arrivals_cache: HashMap<String, ArrivalsArtifact>,
    /// arrivals fetch failures by cache key
    pub arrivals_errors: HashMap<String, String>,
    /// stat artifacts that exist but could not be read, by kind and cache key
    pub artifact_errors: HashMap<(ArtifactKind, String), String>,
    pub metrics: MetricsState,
}

impl DashboardState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::GraphParamsPatched(patch) => {
                self.graph_params = self.graph_params.merge(&patch);
            }
            Action::RoutesReceived { agency_id, routes } => {
                self.routes_errors.remove(&agency_id);
                self.routes.entry(agency_id).or_insert(routes);
            }
            Action::RoutesError { agency_id, message } => {
                self.routes_errors.insert(agency_id, message);
            }
            Action::TripTimesReceived { key, artifact } => {
                self.artifact_errors
                    .remove(&(ArtifactKind::TripTimes, key.clone()));
                self.trip_times_cache.entry(key).or_insert(artifact);
            }
            Action::WaitTimesReceived { key, artifact } => {
                self.artifact_errors
                    .remove(&(ArtifactKind::WaitTimes, key.clone()));
                self.wait_times_cache.entry(key).or_insert(artifact);
            }
            Action::ArtifactError { kind, key, message } => {
                self.artifact_errors.insert((kind, key), message);
            }
            Action::ArrivalsReceived { key, artifact } => {
                self.arrivals_errors.remove(&key);
                self.arrivals_cache.entry(key).or_insert(artifact);
            }
            Action::ArrivalsError { key, message } => {
                log::debug!("arrivals {key} unavailable: {message}");
                self.arrivals_errors.insert(key, message);
            }
            Action::MetricsRequested => {
                self.metrics.loading = true;
                self.metrics.error = None;
            }
            Action::MetricsReceived(metrics) => {
                self.metrics = MetricsState {
                    loading: false,
                    data: Some(metrics),
                    error: None,
                };
            }
            Action::MetricsError(message) => {
                self.metrics = MetricsState {
                    loading: false,
                    data: None,
                    error: Some(message),
                };
            }
            Action::MetricsReset => {
                self.metrics = MetricsState::default();
            }
        }
    }

    pub fn routes_for(&self, agency_id: &str) -> Option<&[Route]> {
        self.routes.get(agency_id).map(|r| r.as_slice())
    }

    /// routes of the selected agency, empty until they are loaded
    pub fn current_routes(&self) -> &[Route] {
        self.graph_params
            .agency_id
            .as_deref()
            .and_then(|id| self.routes_for(id))
            .unwrap_or_default()
    }

    pub fn has_artifact(&self, kind: ArtifactKind, key: &str) -> bool {
        match kind {
            ArtifactKind::Routes => self.routes.contains_key(key),
            ArtifactKind::TripTimes => self.trip_times_cache.contains_key(key),
            ArtifactKind::WaitTimes => self.wait_times_cache.contains_key(key),
            ArtifactKind::Arrivals => self.arrivals_cache.contains_key(key),
        }
    }

    pub fn trip_times(&self, key: &str) -> Option<&TripTimesArtifact> {
        self.trip_times_cache.get(key)
    }

    pub fn wait_times(&self, key: &str) -> Option<&WaitTimesArtifact> {
        self.wait_times_cache.get(key)
    }

    pub fn arrivals(&self, key: &str) -> Option<&ArrivalsArtifact> {
        self.arrivals_cache.get(key)
    }

    /// cache key of the arrivals for the selected agency, date and route
    pub fn current_arrivals_key(&self) -> Option<String> {
        let params = &self.graph_params;
        match (&params.agency_id, params.date, &params.route_id) {
            (Some(agency_id), Some(date), Some(route_id)) => Some(
                ArtifactRequest::Arrivals {
                    agency_id: agency_id.clone(),
                    date,
                    route_id: route_id.clone(),
                }
                .cache_key(),
            ),
            _ => None,
        }
    }

    pub fn current_arrivals(&self) -> Option<&ArrivalsArtifact> {
        self.current_arrivals_key()
            .and_then(|key| self.arrivals_cache.get(&key))
    }

    /// fetch failure of the selected arrivals, if any. errors of other
    /// routes or dates are never reported here.
    pub fn current_arrivals_error(&self) -> Option<&str> {
        self.current_arrivals_key()
            .and_then(|key| self.arrivals_errors.get(&key))
            .map(String::as_str)
    }

    /// selected route, direction and stop choices for the control panel
    pub fn selection_view(&self) -> SelectionView<'_> {
        SelectionView::derive(&self.graph_params, self.current_routes())
    }
}
