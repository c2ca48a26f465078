use serde::{Deserialize, Serialize};

/// the kinds of precomputed artifacts in the object store. each kind is
/// versioned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Routes,
    TripTimes,
    WaitTimes,
    Arrivals,
}

impl ArtifactKind {
    /// top-level directory and file name prefix of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Routes => "routes",
            ArtifactKind::TripTimes => "trip-times",
            ArtifactKind::WaitTimes => "wait-times",
            ArtifactKind::Arrivals => "arrivals",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
