mod direction;
mod graph_params;
mod graph_params_patch;
mod route;
mod stop;

pub use direction::{Coord, Direction, StopGeometry};
pub use graph_params::GraphParams;
pub use graph_params_patch::GraphParamsPatch;
pub use route::{find_route, Route};
pub use stop::Stop;
