//! Route model, artifact path construction and control panel selection logic
//! shared by the OpenTransit dashboard client.
pub mod artifact;
pub mod model;
pub mod selection;
