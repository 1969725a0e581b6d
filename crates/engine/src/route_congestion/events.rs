//! Route lifecycle events.

use bevy::prelude::*;

use crate::geo::LonLat;

/// Request to add a route. Fewer than 2 coordinates is rejected with a
/// warning; `base_traffic: None` defaults per the congestion params.
#[derive(Event, Debug, Clone)]
pub struct AddRoute {
    pub id: Option<u64>,
    pub coordinates: Vec<LonLat>,
    pub base_traffic: Option<f64>,
}

/// Change a route's base traffic volume; congestion recomputes immediately.
#[derive(Event, Debug, Clone, Copy)]
pub struct SetRouteTraffic {
    pub id: u64,
    pub base_traffic: f64,
}

/// Remove a route.
#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveRoute {
    pub id: u64,
}
