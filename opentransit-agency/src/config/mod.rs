mod agency_config;
mod agency_config_error;
mod agency_provider;
mod custom_direction;
mod dashboard_config;
mod day_start_hour;
mod display_defaults;
mod loader;
mod route_heuristics;

pub use agency_config::AgencyConfig;
pub use agency_config_error::AgencyConfigError;
pub use agency_provider::AgencyProvider;
pub use custom_direction::{CustomDirection, RouteCustomDirections};
pub use dashboard_config::{DashboardConfig, PrefetchStatGroups};
pub use day_start_hour::CustomDayStartHour;
pub use display_defaults::{DisplayDefaults, LonLat};
pub use loader::{validate_agency_id, CONFIG_YAML_ENV_VAR, ENV_PREFIX};
pub use route_heuristics::{DirectionHeuristics, RouteHeuristics};
