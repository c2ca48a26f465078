mod action;
mod dashboard_state;
mod metrics_state;
mod state_store;

pub use action::Action;
pub use dashboard_state::DashboardState;
pub use metrics_state::MetricsState;
pub use state_store::Store;
