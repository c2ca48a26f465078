use chrono::NaiveDate;
use futures::future::join_all;
use opentransit_agency::config::PrefetchStatGroups;
use opentransit_agency::DashboardConfig;
use opentransit_core::artifact::payload::{
    ArrivalsArtifact, RoutesArtifact, TripTimesArtifact, WaitTimesArtifact,
};
use opentransit_core::artifact::{ArtifactKind, ArtifactRequest, StatGroup, TimeWindow};
use opentransit_core::model::{GraphParams, GraphParamsPatch};
use opentransit_core::selection::SelectionChange;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::FetchOutcome;
use crate::collection::{ArtifactCollector, ArtifactCollectorConfig, CollectionError};
use crate::metrics::MetricsClient;
use crate::store::{Action, Store};

/// async actions of the dashboard. each action reads the store, performs at
/// most one request and dispatches its result back into the store.
#[derive(Debug, Clone)]
pub struct DashboardActions {
    store: Store,
    collector: Arc<ArtifactCollector>,
    metrics: Arc<MetricsClient>,
    stat_groups: PrefetchStatGroups,
}

impl DashboardActions {
    pub fn new(
        store: Store,
        collector: ArtifactCollector,
        metrics: MetricsClient,
        stat_groups: PrefetchStatGroups,
    ) -> Self {
        Self {
            store,
            collector: Arc::new(collector),
            metrics: Arc::new(metrics),
            stat_groups,
        }
    }

    pub fn from_config(config: &DashboardConfig, store: Store) -> Result<Self, CollectionError> {
        let collector = ArtifactCollectorConfig::from(config).build()?;
        Ok(Self::new(
            store,
            collector,
            MetricsClient::new(&config.metrics_api_url),
            config.stat_groups.clone(),
        ))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn collector(&self) -> &ArtifactCollector {
        &self.collector
    }

    /// loads the route list of an agency unless it is already loaded.
    /// failures are kept as the agency's routes error.
    pub async fn fetch_routes(&self, agency_id: &str) -> FetchOutcome {
        if self.store.read(|s| s.routes.contains_key(agency_id)).await {
            log::debug!("routes for {agency_id} already loaded");
            return FetchOutcome::Cached;
        }
        let request = ArtifactRequest::Routes {
            agency_id: agency_id.to_string(),
        };
        match self.collector.collect::<RoutesArtifact>(&request).await {
            Ok(artifact) => {
                self.store
                    .dispatch(Action::RoutesReceived {
                        agency_id: agency_id.to_string(),
                        routes: artifact.routes,
                    })
                    .await;
                FetchOutcome::Fetched
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("failed to load routes for {agency_id}: {message}");
                self.store
                    .dispatch(Action::RoutesError {
                        agency_id: agency_id.to_string(),
                        message: message.clone(),
                    })
                    .await;
                if e.is_not_found() {
                    FetchOutcome::Unavailable
                } else {
                    FetchOutcome::Failed(message)
                }
            }
        }
    }

    pub async fn fetch_trip_times(
        &self,
        agency_id: &str,
        date: NaiveDate,
        stat_group: StatGroup,
        time_window: Option<TimeWindow>,
    ) -> FetchOutcome {
        let request = ArtifactRequest::TripTimes {
            agency_id: agency_id.to_string(),
            date,
            stat_group,
            time_window,
        };
        self.fetch_stat_artifact(request, |key, artifact: TripTimesArtifact| {
            Action::TripTimesReceived { key, artifact }
        })
        .await
    }

    pub async fn fetch_wait_times(
        &self,
        agency_id: &str,
        date: NaiveDate,
        stat_group: StatGroup,
        time_window: Option<TimeWindow>,
    ) -> FetchOutcome {
        let request = ArtifactRequest::WaitTimes {
            agency_id: agency_id.to_string(),
            date,
            stat_group,
            time_window,
        };
        self.fetch_stat_artifact(request, |key, artifact: WaitTimesArtifact| {
            Action::WaitTimesReceived { key, artifact }
        })
        .await
    }

    /// a missing trip/wait artifact is expected absence. other failures are
    /// recorded as artifact errors and leave the cache entry empty.
    async fn fetch_stat_artifact<T, F>(&self, request: ArtifactRequest, received: F) -> FetchOutcome
    where
        T: DeserializeOwned,
        F: FnOnce(String, T) -> Action,
    {
        let kind = request.kind();
        let key = request.cache_key();
        if self.store.read(|s| s.has_artifact(kind, &key)).await {
            log::debug!("{kind} {key} already cached");
            return FetchOutcome::Cached;
        }
        match self.collector.collect::<T>(&request).await {
            Ok(artifact) => {
                self.store.dispatch(received(key, artifact)).await;
                FetchOutcome::Fetched
            }
            Err(e) if e.is_not_found() => {
                log::debug!("{kind} {key} not available: {e}");
                FetchOutcome::Unavailable
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("failed to fetch {kind} {key}: {message}");
                self.store
                    .dispatch(Action::ArtifactError {
                        kind,
                        key,
                        message: message.clone(),
                    })
                    .await;
                FetchOutcome::Failed(message)
            }
        }
    }

    /// loads the arrivals of one route and date. failures are kept as the
    /// arrivals error.
    pub async fn fetch_arrivals(&self, agency_id: &str, date: NaiveDate, route_id: &str) -> FetchOutcome {
        let request = ArtifactRequest::Arrivals {
            agency_id: agency_id.to_string(),
            date,
            route_id: route_id.to_string(),
        };
        let key = request.cache_key();
        if self
            .store
            .read(|s| s.has_artifact(ArtifactKind::Arrivals, &key))
            .await
        {
            log::debug!("arrivals {key} already cached");
            return FetchOutcome::Cached;
        }
        match self.collector.collect::<ArrivalsArtifact>(&request).await {
            Ok(artifact) => {
                self.store
                    .dispatch(Action::ArrivalsReceived { key, artifact })
                    .await;
                FetchOutcome::Fetched
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("failed to load arrivals {key}: {message}");
                let not_found = e.is_not_found();
                self.store
                    .dispatch(Action::ArrivalsError {
                        key,
                        message: message.clone(),
                    })
                    .await;
                if not_found {
                    FetchOutcome::Unavailable
                } else {
                    FetchOutcome::Failed(message)
                }
            }
        }
    }

    /// queries the metrics service for the selected trip. the error message
    /// is kept for display.
    pub async fn fetch_metrics(&self, params: &GraphParams) -> FetchOutcome {
        self.store.dispatch(Action::MetricsRequested).await;
        match self.metrics.fetch(params).await {
            Ok(metrics) => {
                self.store.dispatch(Action::MetricsReceived(metrics)).await;
                FetchOutcome::Fetched
            }
            Err(e) => {
                let message = e.display_message();
                log::warn!("metrics request to {} failed: {e}", self.metrics.url());
                self.store
                    .dispatch(Action::MetricsError(message.clone()))
                    .await;
                FetchOutcome::Failed(message)
            }
        }
    }

    /// merges a params update into the store and triggers the fetches that
    /// depend on the changed fields. returns the new params.
    pub async fn handle_graph_params(&self, patch: GraphParamsPatch) -> GraphParams {
        let (previous, current) = self.store.update_params(&patch).await;

        if !current.has_trip_selection() {
            self.store.dispatch(Action::MetricsReset).await;
        } else if previous != current {
            self.fetch_metrics(&current).await;
        }

        if current.artifact_scope_changed(&previous) {
            self.prefetch_stat_artifacts(&current).await;
        }

        let arrivals_scope_changed =
            previous.route_id != current.route_id || previous.date != current.date;
        if arrivals_scope_changed {
            if let (Some(agency_id), Some(route_id), Some(date)) =
                (&current.agency_id, &current.route_id, current.date)
            {
                self.fetch_arrivals(agency_id, date, route_id).await;
            }
        }

        current
    }

    async fn prefetch_stat_artifacts(&self, params: &GraphParams) {
        let (Some(agency_id), Some(date)) = (&params.agency_id, params.date) else {
            return;
        };
        let time_window = match params.time_window() {
            Ok(time_window) => time_window,
            Err(e) => {
                log::warn!("not fetching stat artifacts for {agency_id}: {e}");
                return;
            }
        };
        let trip_times = join_all(self.stat_groups.trip_times.iter().map(|group| {
            self.fetch_trip_times(agency_id, date, group.clone(), time_window.clone())
        }));
        let wait_times = join_all(self.stat_groups.wait_times.iter().map(|group| {
            self.fetch_wait_times(agency_id, date, group.clone(), time_window.clone())
        }));
        let (trip_outcomes, wait_outcomes) = futures::join!(trip_times, wait_times);
        let failures = trip_outcomes
            .iter()
            .chain(wait_outcomes.iter())
            .filter(|o| o.is_failure())
            .count();
        log::debug!(
            "stat artifacts for {agency_id} {date}: {} requested, {failures} failed",
            trip_outcomes.len() + wait_outcomes.len()
        );
    }

    /// applies a control panel change. selecting another agency loads its
    /// routes first.
    pub async fn select(&self, change: SelectionChange) -> GraphParams {
        if let SelectionChange::Agency(agency_id) = &change {
            self.fetch_routes(agency_id).await;
        }
        let patch = self
            .store
            .read(|s| change.to_patch(&s.graph_params, s.current_routes()))
            .await;
        if patch.is_empty() {
            return self.store.read(|s| s.graph_params.clone()).await;
        }
        self.handle_graph_params(patch).await
    }
}

#[cfg(test)]
mod test {
    use super::DashboardActions;
    use crate::actions::FetchOutcome;
    use crate::collection::{ArtifactCollector, ArtifactSource};
    use crate::metrics::MetricsClient;
    use crate::store::Store;
    use chrono::NaiveDate;
    use object_store::{memory::InMemory, path::Path, ObjectStore, PutPayload};
    use opentransit_agency::config::PrefetchStatGroups;
    use opentransit_core::artifact::{ArtifactKind, ArtifactVersions, StatGroup};
    use opentransit_core::model::GraphParamsPatch;
    use opentransit_core::selection::SelectionChange;
    use std::sync::Arc;

    /// nothing listens on the discard port, requests fail fast
    const UNREACHABLE_METRICS_URL: &str = "http://127.0.0.1:9/api/graphql";

    const ROUTES_KEY: &str = "routes/v3a/routes_v3a_muni.json.gz";
    const TRIP_MEDIAN_KEY: &str =
        "trip-times/v1a/muni/2020/01/15/trip-times_v1a_muni_2020-01-15_median.json.gz";
    const WAIT_MEDIAN_KEY: &str =
        "wait-times/v1b/muni/2020/01/15/wait-times_v1b_muni_2020-01-15_median.json.gz";
    const ARRIVALS_KEY: &str = "arrivals/v4/muni/2020/01/15/arrivals_v4_muni_2020-01-15_1.json.gz";

    const ROUTES: &str = r#"{"routes":[
        {"id":"1","title":"1-California","stops":{},
         "directions":[{"id":"0","title":"Outbound","stops":["A","B","C"]},
                       {"id":"1","title":"Inbound","stops":["C","B","A"]}]},
        {"id":"N","title":"N-Judah","stops":{},
         "directions":[{"id":"0","title":"Outbound","stops":["X","Y"]}]}]}"#;
    const ARRIVALS: &str = r#"{"version":"v4","stops":{"A":{"arrivals":{"0":[{"t":1579100000,"v":"1402"}]}}}}"#;

    fn trip_times(version: &str) -> String {
        format!(r#"{{"version":"{version}","routes":{{"1":{{"0":{{"A":{{"C":12.5}}}}}}}}}}"#)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
    }

    async fn put(store: &InMemory, key: &str, body: &str) {
        store
            .put(&Path::from(key), PutPayload::from(body.as_bytes().to_vec()))
            .await
            .unwrap();
    }

    async fn setup() -> (Arc<InMemory>, DashboardActions) {
        let object_store = Arc::new(InMemory::new());
        put(&object_store, ROUTES_KEY, ROUTES).await;
        put(&object_store, TRIP_MEDIAN_KEY, &trip_times("first")).await;
        put(
            &object_store,
            WAIT_MEDIAN_KEY,
            r#"{"routes":{"1":{"0":{"A":4.0}}}}"#,
        )
        .await;
        put(&object_store, ARRIVALS_KEY, ARRIVALS).await;
        let collector = ArtifactCollector::new(
            ArtifactSource::ObjectStore(object_store.clone()),
            ArtifactVersions::default(),
        );
        let actions = DashboardActions::new(
            Store::default(),
            collector,
            MetricsClient::new(UNREACHABLE_METRICS_URL),
            PrefetchStatGroups::default(),
        );
        (object_store, actions)
    }

    #[tokio::test]
    async fn test_fetch_routes_once() {
        let (_, actions) = setup().await;
        assert_eq!(actions.fetch_routes("muni").await, FetchOutcome::Fetched);
        assert_eq!(actions.fetch_routes("muni").await, FetchOutcome::Cached);
        let count = actions
            .store()
            .read(|s| s.routes_for("muni").map(|r| r.len()))
            .await;
        assert_eq!(count, Some(2));
    }

    #[tokio::test]
    async fn test_missing_routes_is_error_state() {
        let (_, actions) = setup().await;
        assert_eq!(actions.fetch_routes("actransit").await, FetchOutcome::Unavailable);
        let state = actions.store().snapshot().await;
        assert!(state.routes_errors.contains_key("actransit"));
        assert!(state.routes_for("actransit").is_none());
    }

    #[tokio::test]
    async fn test_cached_trip_times_not_refetched() {
        let (object_store, actions) = setup().await;
        let outcome = actions
            .fetch_trip_times("muni", date(), StatGroup::Median, None)
            .await;
        assert_eq!(outcome, FetchOutcome::Fetched);

        put(&object_store, TRIP_MEDIAN_KEY, &trip_times("second")).await;
        let outcome = actions
            .fetch_trip_times("muni", date(), StatGroup::Median, None)
            .await;
        assert_eq!(outcome, FetchOutcome::Cached);

        let version = actions
            .store()
            .read(|s| {
                s.trip_times("muni-2020-01-15-median")
                    .and_then(|a| a.version.clone())
            })
            .await;
        assert_eq!(version.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_missing_trip_times_is_silent() {
        let (_, actions) = setup().await;
        let outcome = actions
            .fetch_trip_times("muni", date(), StatGroup::P10MedianP90, None)
            .await;
        assert_eq!(outcome, FetchOutcome::Unavailable);
        let state = actions.store().snapshot().await;
        assert!(state.artifact_errors.is_empty());
        assert!(state.trip_times_cache.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_wait_times_recorded_and_retried() {
        let (object_store, actions) = setup().await;
        put(&object_store, WAIT_MEDIAN_KEY, "{not json").await;
        let outcome = actions
            .fetch_wait_times("muni", date(), StatGroup::Median, None)
            .await;
        assert!(outcome.is_failure());
        let has_error = actions
            .store()
            .read(|s| {
                s.artifact_errors
                    .contains_key(&(ArtifactKind::WaitTimes, String::from("muni-2020-01-15-median")))
            })
            .await;
        assert!(has_error);

        put(&object_store, WAIT_MEDIAN_KEY, r#"{"routes":{}}"#).await;
        let outcome = actions
            .fetch_wait_times("muni", date(), StatGroup::Median, None)
            .await;
        assert_eq!(outcome, FetchOutcome::Fetched);
        let state = actions.store().snapshot().await;
        assert!(state.artifact_errors.is_empty());
        assert!(state.wait_times("muni-2020-01-15-median").is_some());
    }

    #[tokio::test]
    async fn test_agency_and_date_prefetch_stat_artifacts() {
        let (_, actions) = setup().await;
        let patch = GraphParamsPatch::default()
            .set_agency_id(Some(String::from("muni")))
            .set_date(Some(date()));
        actions.handle_graph_params(patch).await;

        let state = actions.store().snapshot().await;
        assert!(state.trip_times("muni-2020-01-15-median").is_some());
        assert!(state.trip_times("muni-2020-01-15-p10-median-p90").is_none());
        assert!(state.wait_times("muni-2020-01-15-median").is_some());
        assert!(state.artifact_errors.is_empty());
        assert!(state.arrivals_cache.is_empty());
        assert!(state.metrics.data.is_none());
        assert!(!state.metrics.loading);
    }

    #[tokio::test]
    async fn test_route_selection_fetches_arrivals() {
        let (_, actions) = setup().await;
        actions.select(SelectionChange::Agency(String::from("muni"))).await;
        actions.select(SelectionChange::Date(date())).await;
        let params = actions
            .select(SelectionChange::Route(Some(String::from("1"))))
            .await;
        assert_eq!(params.route_id.as_deref(), Some("1"));

        let state = actions.store().snapshot().await;
        let arrivals = state.arrivals("muni-2020-01-15-1").unwrap();
        assert_eq!(arrivals.arrivals_at("A", "0").len(), 1);
        assert!(state.current_arrivals_error().is_none());
    }

    #[tokio::test]
    async fn test_returning_to_cached_route_shows_no_stale_error() {
        let (_, actions) = setup().await;
        actions.select(SelectionChange::Agency(String::from("muni"))).await;
        actions.select(SelectionChange::Date(date())).await;
        actions
            .select(SelectionChange::Route(Some(String::from("1"))))
            .await;
        actions
            .select(SelectionChange::Route(Some(String::from("N"))))
            .await;
        let state = actions.store().snapshot().await;
        assert!(state.current_arrivals().is_none());
        assert!(state.current_arrivals_error().is_some());

        actions
            .select(SelectionChange::Route(Some(String::from("1"))))
            .await;
        let outcome = actions.fetch_arrivals("muni", date(), "1").await;
        assert_eq!(outcome, FetchOutcome::Cached);
        let state = actions.store().snapshot().await;
        assert!(state.current_arrivals().is_some());
        assert!(state.current_arrivals_error().is_none());
        assert!(state.arrivals_errors.contains_key("muni-2020-01-15-N"));
    }

    #[tokio::test]
    async fn test_route_change_resets_selection() {
        let (_, actions) = setup().await;
        actions.select(SelectionChange::Agency(String::from("muni"))).await;
        actions
            .select(SelectionChange::Route(Some(String::from("1"))))
            .await;
        actions
            .select(SelectionChange::Direction(Some(String::from("0"))))
            .await;
        let params = actions
            .select(SelectionChange::StartStop(Some(String::from("B"))))
            .await;
        assert_eq!(params.start_stop_id.as_deref(), Some("B"));
        let second = actions
            .store()
            .read(|s| {
                s.selection_view()
                    .second_stop_choices
                    .into_iter()
                    .map(|c| c.id)
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(second, vec![String::from("C")]);

        let params = actions
            .select(SelectionChange::Route(Some(String::from("N"))))
            .await;
        assert_eq!(params.route_id.as_deref(), Some("N"));
        assert_eq!(params.direction_id, None);
        assert_eq!(params.start_stop_id, None);
        assert_eq!(params.end_stop_id, None);
    }

    #[tokio::test]
    async fn test_metrics_failure_kept_for_display() {
        let (_, actions) = setup().await;
        let patch = GraphParamsPatch::default()
            .set_agency_id(Some(String::from("muni")))
            .set_route_id(Some(String::from("1")))
            .set_direction_id(Some(String::from("0")))
            .set_start_stop_id(Some(String::from("A")))
            .set_end_stop_id(Some(String::from("C")))
            .set_date(Some(date()));
        actions.handle_graph_params(patch).await;
        let metrics = actions.store().read(|s| s.metrics.clone()).await;
        assert!(!metrics.loading);
        assert!(metrics.data.is_none());
        assert!(metrics.error.is_some());
    }
}
