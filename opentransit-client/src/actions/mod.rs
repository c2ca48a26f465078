mod dashboard_actions;
mod fetch_outcome;

pub use dashboard_actions::DashboardActions;
pub use fetch_outcome::FetchOutcome;
