use opentransit_core::model::{GraphParams, GraphParamsPatch};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

use super::{Action, DashboardState};

/// process-wide state container. actions are applied one at a time under a
/// single write lock; each applied action bumps the revision observed by
/// subscribers.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<RwLock<DashboardState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DashboardState::default())
    }
}

impl Store {
    pub fn new(state: DashboardState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(RwLock::new(state)),
            revision: Arc::new(revision),
        }
    }

    /// applies an action and returns the new revision
    pub async fn dispatch(&self, action: Action) -> u64 {
        let mut state = self.state.write().await;
        state.reduce(action);
        self.bump()
    }

    /// merges a params patch, returning the params before and after
    pub async fn update_params(&self, patch: &GraphParamsPatch) -> (GraphParams, GraphParams) {
        let mut state = self.state.write().await;
        let previous = state.graph_params.clone();
        state.reduce(Action::GraphParamsPatched(patch.clone()));
        let current = state.graph_params.clone();
        self.bump();
        (previous, current)
    }

    pub async fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn bump(&self) -> u64 {
        self.revision.send_modify(|r| *r += 1);
        *self.revision.borrow()
    }
}
