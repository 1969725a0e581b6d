use bevy::prelude::*;

use super::events::{AddRoute, RemoveRoute, SetRouteTraffic};
use super::systems::{handle_route_events, recompute_congestion};
use super::types::RouteIdAllocator;

pub struct RouteCongestionPlugin;

impl Plugin for RouteCongestionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RouteIdAllocator>()
            .add_event::<AddRoute>()
            .add_event::<SetRouteTraffic>()
            .add_event::<RemoveRoute>()
            .add_systems(
                Update,
                (handle_route_events, recompute_congestion)
                    .chain()
                    .after(crate::buildings::handle_building_events),
            );
    }
}
