mod app_error;
mod opentransit_cli;
mod run;

pub use app_error::AppError;
pub use opentransit_cli::{OpenTransitCliArguments, OpenTransitOperation};
