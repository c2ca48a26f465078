//! control panel selection cascade: route → direction → from-stop → to-stop.
//! every change invalidates the fields to its right.
mod selection_change;
mod selection_view;

pub use selection_change::SelectionChange;
pub use selection_view::{second_stop_ids, SelectionView, StopChoice};
