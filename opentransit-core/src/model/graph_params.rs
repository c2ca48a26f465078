use super::GraphParamsPatch;
use crate::artifact::{ArtifactPathError, TimeWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// the shared query parameters selecting agency, route, direction, stop pair,
/// service date and time window. updated incrementally by merging
/// [`GraphParamsPatch`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphParams {
    pub agency_id: Option<String>,
    pub route_id: Option<String>,
    pub direction_id: Option<String>,
    pub start_stop_id: Option<String>,
    pub end_stop_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl GraphParams {
    /// merges a partial update into a copy of these params. fields absent
    /// from the patch keep their current value.
    pub fn merge(&self, patch: &GraphParamsPatch) -> GraphParams {
        fn pick<T: Clone>(current: &Option<T>, update: &Option<Option<T>>) -> Option<T> {
            match update {
                Some(value) => value.clone(),
                None => current.clone(),
            }
        }
        GraphParams {
            agency_id: pick(&self.agency_id, &patch.agency_id),
            route_id: pick(&self.route_id, &patch.route_id),
            direction_id: pick(&self.direction_id, &patch.direction_id),
            start_stop_id: pick(&self.start_stop_id, &patch.start_stop_id),
            end_stop_id: pick(&self.end_stop_id, &patch.end_stop_id),
            date: pick(&self.date, &patch.date),
            start_time: pick(&self.start_time, &patch.start_time),
            end_time: pick(&self.end_time, &patch.end_time),
        }
    }

    /// true once every field needed to query trip metrics is present.
    pub fn has_trip_selection(&self) -> bool {
        self.agency_id.is_some()
            && self.route_id.is_some()
            && self.direction_id.is_some()
            && self.start_stop_id.is_some()
            && self.end_stop_id.is_some()
    }

    /// the validated time window, if any. a window with only one bound set is
    /// an error.
    pub fn time_window(&self) -> Result<Option<TimeWindow>, ArtifactPathError> {
        match (&self.start_time, &self.end_time) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => TimeWindow::new(start, end).map(Some),
            (start, end) => Err(ArtifactPathError::IncompleteTimeWindow {
                start: start.clone(),
                end: end.clone(),
            }),
        }
    }

    /// true if the fields that scope precomputed stat artifacts differ.
    pub fn artifact_scope_changed(&self, other: &GraphParams) -> bool {
        self.agency_id != other.agency_id
            || self.date != other.date
            || self.start_time != other.start_time
            || self.end_time != other.end_time
    }
}
