use opentransit_agency::DashboardConfig;
use opentransit_core::artifact::payload::StatValue;
use opentransit_core::artifact::{ArtifactRequest, StatGroup, TimeWindow};
use opentransit_core::model::{find_route, GraphParams};
use opentransit_core::selection::SelectionView;

use super::{AppError, OpenTransitOperation};
use crate::actions::{DashboardActions, FetchOutcome};
use crate::metrics::MetricsClient;
use crate::store::Store;

pub async fn run_operation(
    op: &OpenTransitOperation,
    config: &DashboardConfig,
) -> Result<(), AppError> {
    match op {
        OpenTransitOperation::Urls {
            agency,
            date,
            stat_group,
            start_time,
            end_time,
            route,
        } => {
            let time_window = time_window(start_time, end_time)?;
            let mut requests = vec![
                ArtifactRequest::Routes {
                    agency_id: agency.clone(),
                },
                ArtifactRequest::TripTimes {
                    agency_id: agency.clone(),
                    date: *date,
                    stat_group: stat_group.clone(),
                    time_window: time_window.clone(),
                },
                ArtifactRequest::WaitTimes {
                    agency_id: agency.clone(),
                    date: *date,
                    stat_group: stat_group.clone(),
                    time_window,
                },
            ];
            if let Some(route_id) = route {
                requests.push(ArtifactRequest::Arrivals {
                    agency_id: agency.clone(),
                    date: *date,
                    route_id: route_id.clone(),
                });
            }
            for request in requests {
                let url = request.url(&config.s3_bucket, &config.versions)?;
                println!("{}\t{}\t{url}", request.kind(), request.cache_key());
            }
            Ok(())
        }
        OpenTransitOperation::Routes { agency } => {
            let actions = DashboardActions::from_config(config, Store::default())?;
            load_routes(&actions, agency).await?;
            let routes = actions
                .store()
                .read(|s| s.routes_for(agency).map(|r| r.to_vec()))
                .await
                .unwrap_or_default();
            for route in routes {
                let directions = route
                    .directions
                    .iter()
                    .map(|d| d.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}\t{}\t{directions}", route.id, route.title);
            }
            Ok(())
        }
        OpenTransitOperation::TripTimes {
            agency,
            date,
            stat_group,
            start_time,
            end_time,
            route,
            direction,
            from_stop,
            to_stop,
        } => {
            let actions = DashboardActions::from_config(config, Store::default())?;
            let time_window = time_window(start_time, end_time)?;
            let request = ArtifactRequest::TripTimes {
                agency_id: agency.clone(),
                date: *date,
                stat_group: stat_group.clone(),
                time_window: time_window.clone(),
            };
            let outcome = actions
                .fetch_trip_times(agency, *date, stat_group.clone(), time_window)
                .await;
            let key = request.cache_key();
            let artifact = actions
                .store()
                .read(|s| s.trip_times(&key).cloned())
                .await
                .ok_or_else(|| unavailable("trip times", &key, &outcome))?;
            match to_stop {
                Some(to_stop) => {
                    let value = artifact
                        .get_value(route, direction, from_stop, to_stop)
                        .ok_or_else(|| {
                            AppError::Unavailable(format!(
                                "no trip time from {from_stop} to {to_stop} on route {route} direction {direction}"
                            ))
                        })?;
                    println!("{to_stop}\t{}", format_stat(stat_group, value));
                }
                None => {
                    let values = artifact
                        .get_values_from(route, direction, from_stop)
                        .ok_or_else(|| {
                            AppError::Unavailable(format!(
                                "no trip times from {from_stop} on route {route} direction {direction}"
                            ))
                        })?;
                    let mut values = values.iter().collect::<Vec<_>>();
                    values.sort_by(|a, b| a.0.cmp(b.0));
                    for (stop_id, value) in values {
                        println!("{stop_id}\t{}", format_stat(stat_group, value));
                    }
                }
            }
            Ok(())
        }
        OpenTransitOperation::WaitTimes {
            agency,
            date,
            stat_group,
            start_time,
            end_time,
            route,
            direction,
            stop,
        } => {
            let actions = DashboardActions::from_config(config, Store::default())?;
            let time_window = time_window(start_time, end_time)?;
            let request = ArtifactRequest::WaitTimes {
                agency_id: agency.clone(),
                date: *date,
                stat_group: stat_group.clone(),
                time_window: time_window.clone(),
            };
            let outcome = actions
                .fetch_wait_times(agency, *date, stat_group.clone(), time_window)
                .await;
            let key = request.cache_key();
            let artifact = actions
                .store()
                .read(|s| s.wait_times(&key).cloned())
                .await
                .ok_or_else(|| unavailable("wait times", &key, &outcome))?;
            let values = artifact
                .routes
                .get(route)
                .and_then(|r| r.get(direction))
                .ok_or_else(|| {
                    AppError::Unavailable(format!(
                        "no wait times for route {route} direction {direction}"
                    ))
                })?;
            let mut values = values
                .iter()
                .filter(|(stop_id, _)| stop.as_ref().map(|s| s == *stop_id).unwrap_or(true))
                .collect::<Vec<_>>();
            values.sort_by(|a, b| a.0.cmp(b.0));
            for (stop_id, value) in values {
                println!("{stop_id}\t{}", format_stat(stat_group, value));
            }
            Ok(())
        }
        OpenTransitOperation::Arrivals {
            agency,
            date,
            route,
        } => {
            let actions = DashboardActions::from_config(config, Store::default())?;
            let outcome = actions.fetch_arrivals(agency, *date, route).await;
            let key = ArtifactRequest::Arrivals {
                agency_id: agency.clone(),
                date: *date,
                route_id: route.clone(),
            }
            .cache_key();
            let artifact = actions
                .store()
                .read(|s| s.arrivals(&key).cloned())
                .await
                .ok_or_else(|| unavailable("arrivals", &key, &outcome))?;
            let mut stops = artifact.stops.iter().collect::<Vec<_>>();
            stops.sort_by(|a, b| a.0.cmp(b.0));
            for (stop_id, stop_arrivals) in stops {
                let mut directions = stop_arrivals.arrivals.iter().collect::<Vec<_>>();
                directions.sort_by(|a, b| a.0.cmp(b.0));
                for (direction_id, events) in directions {
                    println!("{stop_id}\t{direction_id}\t{}", events.len());
                }
            }
            log::info!("{} arrivals for route {route} on {date}", artifact.len());
            Ok(())
        }
        OpenTransitOperation::Metrics {
            agency,
            route,
            direction,
            start_stop,
            end_stop,
            date,
            start_time,
            end_time,
        } => {
            let params = GraphParams {
                agency_id: Some(agency.clone()),
                route_id: Some(route.clone()),
                direction_id: Some(direction.clone()),
                start_stop_id: Some(start_stop.clone()),
                end_stop_id: Some(end_stop.clone()),
                date: *date,
                start_time: start_time.clone(),
                end_time: end_time.clone(),
            };
            let client = MetricsClient::new(&config.metrics_api_url);
            let metrics = client.fetch(&params).await?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(())
        }
        OpenTransitOperation::Stops {
            agency,
            route,
            direction,
            first_stop,
        } => {
            let actions = DashboardActions::from_config(config, Store::default())?;
            load_routes(&actions, agency).await?;
            let params = GraphParams {
                agency_id: Some(agency.clone()),
                route_id: Some(route.clone()),
                direction_id: Some(direction.clone()),
                start_stop_id: first_stop.clone(),
                ..Default::default()
            };
            let routes = actions
                .store()
                .read(|s| s.routes_for(agency).map(|r| r.to_vec()))
                .await
                .unwrap_or_default();
            if find_route(&routes, route).is_none() {
                return Err(AppError::InvalidArgument(format!(
                    "agency {agency} has no route {route}"
                )));
            }
            let view = SelectionView::derive(&params, &routes);
            if view.direction.is_none() {
                return Err(AppError::InvalidArgument(format!(
                    "route {route} has no direction {direction}"
                )));
            }
            for choice in view.second_stop_choices {
                println!("{}\t{}", choice.id, choice.title);
            }
            Ok(())
        }
        OpenTransitOperation::Agency { agency } => {
            let agency = config.agency(agency)?;
            println!("id\t{}", agency.id);
            println!("provider\t{:?}", agency.provider);
            println!("timezone\t{}", agency.timezone()?);
            println!("default day start hour\t{}", agency.default_day_start_hour);
            for custom in agency.custom_day_start_hours.iter() {
                println!(
                    "day start hour {}\t{}",
                    custom.start_hour,
                    custom.routes.join(", ")
                );
            }
            if let Some(gtfs_url) = &agency.gtfs_url {
                println!("gtfs url\t{gtfs_url}");
            }
            println!("route id gtfs field\t{}", agency.route_id_gtfs_field);
            let ignored = agency
                .route_heuristics
                .iter()
                .filter(|h| h.ignore_route)
                .map(|h| h.route_id.as_str())
                .collect::<Vec<_>>();
            println!("ignored routes\t{}", ignored.join(", "));
            for route in agency.custom_directions.iter() {
                for d in route.directions.iter() {
                    println!(
                        "custom direction\t{}\t{}\t{} (gtfs direction {})",
                        route.route_id, d.id, d.title, d.gtfs_direction_id
                    );
                }
            }
            if let Some(center) = &agency.display.initial_map_center {
                println!("map center\t{}, {}", center.lat, center.lon);
            }
            println!(
                "disabled routes\t{}",
                agency.display.default_disabled_routes.join(", ")
            );
            Ok(())
        }
    }
}

async fn load_routes(actions: &DashboardActions, agency_id: &str) -> Result<(), AppError> {
    match actions.fetch_routes(agency_id).await {
        FetchOutcome::Fetched | FetchOutcome::Cached => Ok(()),
        _ => {
            let message = actions
                .store()
                .read(|s| s.routes_errors.get(agency_id).cloned())
                .await
                .unwrap_or_else(|| format!("routes for {agency_id} unavailable"));
            Err(AppError::Unavailable(message))
        }
    }
}

fn time_window(
    start_time: &Option<String>,
    end_time: &Option<String>,
) -> Result<Option<TimeWindow>, AppError> {
    let params = GraphParams {
        start_time: start_time.clone(),
        end_time: end_time.clone(),
        ..Default::default()
    };
    Ok(params.time_window()?)
}

fn unavailable(what: &str, key: &str, outcome: &FetchOutcome) -> AppError {
    match outcome {
        FetchOutcome::Failed(message) => AppError::Unavailable(message.clone()),
        _ => AppError::Unavailable(format!("no {what} for {key}")),
    }
}

/// renders each statistic of a stat value with its name
fn format_stat(stat_group: &StatGroup, value: &StatValue) -> String {
    let values = value.values();
    if values.is_empty() {
        return String::from("-");
    }
    stat_group
        .components()
        .iter()
        .zip(values.iter())
        .map(|(name, v)| format!("{name}={v:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}
