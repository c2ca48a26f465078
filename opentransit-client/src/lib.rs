//! client side of the OpenTransit metrics dashboard: collects precomputed
//! artifacts from the object store, queries the metrics service, and keeps
//! the dashboard state those responses are merged into.
pub mod actions;
pub mod app;
pub mod collection;
pub mod metrics;
pub mod store;
