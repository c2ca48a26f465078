use serde::{Deserialize, Serialize};

/// service day start hour for overnight routes whose trips run past the
/// agency's default day start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDayStartHour {
    pub start_hour: u32,
    pub routes: Vec<String>,
}
