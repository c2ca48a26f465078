use super::second_stop_ids;
use crate::artifact::TimeWindow;
use crate::model::{find_route, Direction, GraphParams, GraphParamsPatch, Route};
use chrono::NaiveDate;

/// a user interaction with the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Agency(String),
    Route(Option<String>),
    Direction(Option<String>),
    StartStop(Option<String>),
    EndStop(Option<String>),
    Date(NaiveDate),
    TimeWindow(Option<TimeWindow>),
    /// swap the stop pair and pick a direction of the same route that
    /// serves it in the new order
    Reverse,
}

impl SelectionChange {
    /// the params update produced by this change. selecting the current
    /// value, or a change that cannot be applied, yields an empty patch.
    pub fn to_patch(&self, params: &GraphParams, routes: &[Route]) -> GraphParamsPatch {
        let patch = GraphParamsPatch::default();
        match self {
            SelectionChange::Agency(agency_id) => {
                if params.agency_id.as_ref() == Some(agency_id) {
                    return patch;
                }
                patch
                    .set_agency_id(Some(agency_id.clone()))
                    .set_route_id(None)
                    .reset_below_route()
            }
            SelectionChange::Route(route_id) => {
                if &params.route_id == route_id {
                    return patch;
                }
                patch.set_route_id(route_id.clone()).reset_below_route()
            }
            SelectionChange::Direction(direction_id) => {
                if &params.direction_id == direction_id {
                    return patch;
                }
                patch
                    .set_direction_id(direction_id.clone())
                    .reset_below_direction()
            }
            SelectionChange::StartStop(start_stop_id) => {
                if &params.start_stop_id == start_stop_id {
                    return patch;
                }
                let patch = patch.set_start_stop_id(start_stop_id.clone());
                let end_still_valid = match (&params.end_stop_id, selected_direction(params, routes)) {
                    (None, _) => true,
                    (Some(end), Some(direction)) => {
                        second_stop_ids(direction, start_stop_id.as_deref()).contains(end)
                    }
                    (Some(_), None) => false,
                };
                if end_still_valid {
                    patch
                } else {
                    patch.set_end_stop_id(None)
                }
            }
            SelectionChange::EndStop(end_stop_id) => {
                if &params.end_stop_id == end_stop_id {
                    return patch;
                }
                if let (Some(end), Some(direction)) =
                    (end_stop_id, selected_direction(params, routes))
                {
                    let choices = second_stop_ids(direction, params.start_stop_id.as_deref());
                    if !choices.contains(end) {
                        log::debug!(
                            "ignoring end stop {end}, not downstream of {:?} in direction {}",
                            params.start_stop_id,
                            direction.id
                        );
                        return patch;
                    }
                }
                patch.set_end_stop_id(end_stop_id.clone())
            }
            SelectionChange::Date(date) => {
                if params.date.as_ref() == Some(date) {
                    return patch;
                }
                patch.set_date(Some(*date))
            }
            SelectionChange::TimeWindow(window) => {
                let start = window.as_ref().map(|w| w.start_time().to_string());
                let end = window.as_ref().map(|w| w.end_time().to_string());
                if params.start_time == start && params.end_time == end {
                    return patch;
                }
                patch.set_time_window(start, end)
            }
            SelectionChange::Reverse => reverse_patch(params, routes).unwrap_or_else(|| {
                log::debug!("no direction serves the reversed stop pair, keeping selection");
                patch
            }),
        }
    }

    /// applies the change, returning the new params
    pub fn apply(&self, params: &GraphParams, routes: &[Route]) -> GraphParams {
        params.merge(&self.to_patch(params, routes))
    }
}

fn selected_direction<'a>(params: &GraphParams, routes: &'a [Route]) -> Option<&'a Direction> {
    let route = find_route(routes, params.route_id.as_deref()?)?;
    route.direction(params.direction_id.as_deref()?)
}

fn reverse_patch(params: &GraphParams, routes: &[Route]) -> Option<GraphParamsPatch> {
    let route = find_route(routes, params.route_id.as_deref()?)?;
    let start = params.start_stop_id.as_deref()?;
    let end = params.end_stop_id.as_deref()?;
    let direction = route
        .directions
        .iter()
        .find(|d| d.is_ordered_pair(end, start))?;
    Some(
        GraphParamsPatch::default()
            .set_direction_id(Some(direction.id.clone()))
            .set_start_stop_id(Some(end.to_string()))
            .set_end_stop_id(Some(start.to_string())),
    )
}
