/// result of one fetch action. failures are also written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    /// already present in the store, no request was made
    Cached,
    /// the artifact does not exist
    Unavailable,
    Failed(String),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}
