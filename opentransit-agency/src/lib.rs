//! dashboard and per-agency configuration. the per-agency YAML files are
//! shared with the backend precomputation jobs; this crate reads them and
//! answers the questions the dashboard asks of them.
pub mod config;

pub use config::{AgencyConfig, AgencyConfigError, DashboardConfig};
