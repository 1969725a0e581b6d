use bevy::prelude::*;

use crate::buildings::{Building, BuildingSetChanged};
use crate::sim_params::SimParams;

use super::calculator::compute_congestion;
use super::events::{AddRoute, RemoveRoute, SetRouteTraffic};
use super::types::{Route, RouteIdAllocator};

/// Applies route add/edit/remove requests against the current building set.
pub fn handle_route_events(
    mut commands: Commands,
    mut add_events: EventReader<AddRoute>,
    mut traffic_events: EventReader<SetRouteTraffic>,
    mut remove_events: EventReader<RemoveRoute>,
    mut allocator: ResMut<RouteIdAllocator>,
    params: Res<SimParams>,
    buildings: Query<&Building>,
    mut routes: Query<(Entity, &mut Route)>,
) {
    let snapshot: Vec<Building> = buildings.iter().cloned().collect();

    for event in add_events.read() {
        if event.coordinates.len() < 2 {
            warn!(
                "ignoring route with {} coordinate(s); at least two are required",
                event.coordinates.len()
            );
            continue;
        }
        if let Some(bad) = event.coordinates.iter().find(|c| !c.is_finite()) {
            warn!("ignoring route with non-finite coordinate ({}, {})", bad.lon, bad.lat);
            continue;
        }

        let id = match event.id {
            Some(id) => {
                allocator.reserve(id);
                id
            }
            None => allocator.allocate(),
        };
        let base_traffic = event
            .base_traffic
            .unwrap_or(params.congestion.default_base_traffic)
            .clamp(0.0, 100.0);

        let mut route = Route {
            id,
            coordinates: event.coordinates.clone(),
            base_traffic,
            congestion: base_traffic,
        };
        route.congestion = compute_congestion(&route, &snapshot, &params.congestion);
        commands.spawn(route);
    }

    for event in traffic_events.read() {
        let Some((_, mut route)) = routes.iter_mut().find(|(_, r)| r.id == event.id) else {
            warn!("traffic update for unknown route {}", event.id);
            continue;
        };
        route.base_traffic = event.base_traffic.clamp(0.0, 100.0);
        route.congestion = compute_congestion(&route, &snapshot, &params.congestion);
    }

    for event in remove_events.read() {
        let Some((entity, _)) = routes.iter_mut().find(|(_, r)| r.id == event.id) else {
            warn!("remove request for unknown route {}", event.id);
            continue;
        };
        commands.entity(entity).despawn();
    }
}

/// Recomputes every route's congestion whenever the building set changed.
pub fn recompute_congestion(
    mut changed: EventReader<BuildingSetChanged>,
    buildings: Query<&Building>,
    mut routes: Query<&mut Route>,
    params: Res<SimParams>,
) {
    if changed.is_empty() {
        return;
    }
    changed.clear();

    let snapshot: Vec<Building> = buildings.iter().cloned().collect();
    for mut route in routes.iter_mut() {
        let updated = compute_congestion(&route, &snapshot, &params.congestion);
        if (updated - route.congestion).abs() > f64::EPSILON {
            route.congestion = updated;
        }
    }
}
