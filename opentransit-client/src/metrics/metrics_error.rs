use opentransit_core::artifact::ArtifactPathError;

#[derive(thiserror::Error, Debug)]
pub enum MetricsError {
    #[error("trip selection is missing {0}")]
    IncompleteSelection(&'static str),
    #[error(transparent)]
    PathError(#[from] ArtifactPathError),
    #[error("metrics request failed: {0}")]
    TransportError(String),
    /// message supplied by the metrics service in the GraphQL `errors` list
    #[error("{0}")]
    ServerError(String),
    #[error("failed to decode metrics response: {0}")]
    DecodeError(String),
}

impl MetricsError {
    /// message shown next to the metrics panel. server messages are shown
    /// verbatim.
    pub fn display_message(&self) -> String {
        match self {
            MetricsError::ServerError(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
