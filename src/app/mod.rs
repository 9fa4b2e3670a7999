pub mod routes;
pub mod state;

pub use routes::{RouteConfig, nav_configs, nav_index_for_view, path_for_view, resolve_route};
pub use state::*;
