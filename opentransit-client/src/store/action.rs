use opentransit_core::artifact::payload::{ArrivalsArtifact, TripTimesArtifact, WaitTimesArtifact};
use opentransit_core::artifact::ArtifactKind;
use opentransit_core::model::{GraphParamsPatch, Route};

use crate::metrics::TripMetrics;

/// discrete state transitions. the store applies them one at a time.
#[derive(Debug, Clone)]
pub enum Action {
    GraphParamsPatched(GraphParamsPatch),
    RoutesReceived {
        agency_id: String,
        routes: Vec<Route>,
    },
    RoutesError {
        agency_id: String,
        message: String,
    },
    TripTimesReceived {
        key: String,
        artifact: TripTimesArtifact,
    },
    WaitTimesReceived {
        key: String,
        artifact: WaitTimesArtifact,
    },
    /// a stat artifact that exists but could not be read
    ArtifactError {
        kind: ArtifactKind,
        key: String,
        message: String,
    },
    ArrivalsReceived {
        key: String,
        artifact: ArrivalsArtifact,
    },
    ArrivalsError {
        key: String,
        message: String,
    },
    MetricsRequested,
    MetricsReceived(TripMetrics),
    MetricsError(String),
    MetricsReset,
}
