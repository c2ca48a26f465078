//! decoded forms of the JSON artifacts in the object store.
mod arrivals;
mod routes;
mod stat_value;
mod trip_times;
mod wait_times;

pub use arrivals::{ArrivalEvent, ArrivalsArtifact, StopArrivals};
pub use routes::RoutesArtifact;
pub use stat_value::StatValue;
pub use trip_times::TripTimesArtifact;
pub use wait_times::WaitTimesArtifact;
