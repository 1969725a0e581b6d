//! Route congestion: a 0–100 traffic severity scalar per route, perturbed by
//! nearby buildings.
//!
//! Deliberately cheaper than the AQI model — planar distances, linear decay,
//! full recompute on every building-set change (the building set is small;
//! there is no incremental caching to invalidate).

mod calculator;
mod events;
mod plugin;
mod systems;
mod types;


pub use calculator::compute_congestion;
pub use events::{AddRoute, RemoveRoute, SetRouteTraffic};
pub use plugin::RouteCongestionPlugin;
pub use systems::{handle_route_events, recompute_congestion};
pub use types::{Route, RouteIdAllocator};
