use crate::model::{find_route, Direction, GraphParams, Route};
use serde::Serialize;

/// a selectable stop with its display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopChoice {
    pub id: String,
    pub title: String,
}

/// selection state derived from the current params and the loaded routes.
#[derive(Debug, Clone)]
pub struct SelectionView<'a> {
    pub route: Option<&'a Route>,
    pub direction: Option<&'a Direction>,
    pub first_stop_choices: Vec<StopChoice>,
    pub second_stop_choices: Vec<StopChoice>,
}

impl<'a> SelectionView<'a> {
    pub fn derive(params: &GraphParams, routes: &'a [Route]) -> SelectionView<'a> {
        let route = params
            .route_id
            .as_deref()
            .and_then(|id| find_route(routes, id));
        let direction = route.and_then(|r| {
            params
                .direction_id
                .as_deref()
                .and_then(|id| r.direction(id))
        });

        let (first_stop_choices, second_stop_choices) = match (route, direction) {
            (Some(r), Some(d)) => {
                let first = to_choices(r, &d.stops);
                let second =
                    to_choices(r, &second_stop_ids(d, params.start_stop_id.as_deref()));
                (first, second)
            }
            _ => (vec![], vec![]),
        };

        SelectionView {
            route,
            direction,
            first_stop_choices,
            second_stop_choices,
        }
    }
}

/// the valid second stops: every stop strictly after `first_stop` in the
/// direction's sequence, or the whole sequence when no first stop is chosen.
pub fn second_stop_ids(direction: &Direction, first_stop: Option<&str>) -> Vec<String> {
    match first_stop {
        Some(stop_id) => direction.stops_after(stop_id).to_vec(),
        None => direction.stops.clone(),
    }
}

fn to_choices(route: &Route, stop_ids: &[String]) -> Vec<StopChoice> {
    stop_ids
        .iter()
        .map(|id| StopChoice {
            id: id.clone(),
            title: route.stop_title(id).to_string(),
        })
        .collect()
}
