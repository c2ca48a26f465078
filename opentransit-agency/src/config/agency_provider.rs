use serde::{Deserialize, Serialize};

/// source of real-time vehicle data for an agency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencyProvider {
    Nextbus,
    Gtfs,
    #[serde(other)]
    Other,
}
