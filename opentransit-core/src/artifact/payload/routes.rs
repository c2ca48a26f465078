use crate::model::Route;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesArtifact {
    #[serde(default)]
    pub version: Option<String>,
    pub routes: Vec<Route>,
}
