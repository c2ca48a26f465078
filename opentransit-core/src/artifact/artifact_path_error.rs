#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactPathError {
    #[error("invalid {field} '{value}' for an artifact path")]
    InvalidComponent { field: &'static str, value: String },
    #[error("invalid time of day '{0}', expected HH:MM or HH:MM+1")]
    InvalidTimeOfDay(String),
    #[error("time window needs both a start and an end time, got start={start:?}, end={end:?}")]
    IncompleteTimeWindow {
        start: Option<String>,
        end: Option<String>,
    },
    #[error("unknown stat group '{0}'")]
    InvalidStatGroup(String),
}
