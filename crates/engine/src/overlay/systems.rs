use bevy::prelude::*;

use crate::aqi_grid::AqiGrid;
use crate::buildings::Building;
use crate::route_congestion::Route;
use crate::severity::{AqiBand, CongestionBand};

use super::types::{BuildingFeature, CellFeature, OverlaySnapshot, RouteFeature};

/// Rebuilds the snapshot whenever the grid resource, any building, or any
/// route changed this frame (including despawns). A full rebuild keeps the
/// snapshot internally consistent; the feature counts are small enough that
/// incremental patching would buy nothing.
pub fn rebuild_overlay(
    grid: Res<AqiGrid>,
    buildings: Query<&Building>,
    routes: Query<&Route>,
    changed_buildings: Query<(), Changed<Building>>,
    changed_routes: Query<(), Changed<Route>>,
    mut removed_buildings: RemovedComponents<Building>,
    mut removed_routes: RemovedComponents<Route>,
    mut snapshot: ResMut<OverlaySnapshot>,
) {
    let any_removed =
        removed_buildings.read().next().is_some() || removed_routes.read().next().is_some();
    let dirty = grid.is_changed()
        || !changed_buildings.is_empty()
        || !changed_routes.is_empty()
        || any_removed;
    if !dirty {
        return;
    }

    let mut cells: Vec<CellFeature> = grid
        .cells
        .iter()
        .map(|cell| {
            let band = AqiBand::classify(cell.current_aqi);
            CellFeature {
                id: cell.id,
                boundary: cell.boundary,
                aqi: cell.current_aqi,
                measured: cell.original_aqi.is_some(),
                band,
                color: band.color().to_string(),
            }
        })
        .collect();
    cells.sort_by_key(|c| c.id);

    let mut building_features: Vec<BuildingFeature> = buildings
        .iter()
        .map(|b| BuildingFeature {
            id: b.id,
            footprint: b.footprint(),
            kind: b.kind.label().to_string(),
            height: b.height,
            color: b.color.clone(),
        })
        .collect();
    building_features.sort_by_key(|b| b.id);

    let mut route_features: Vec<RouteFeature> = routes
        .iter()
        .map(|r| {
            let band = CongestionBand::classify(r.congestion);
            RouteFeature {
                id: r.id,
                coordinates: r.coordinates.clone(),
                congestion: r.congestion,
                band,
                color: band.color().to_string(),
            }
        })
        .collect();
    route_features.sort_by_key(|r| r.id);

    *snapshot = OverlaySnapshot {
        cells,
        buildings: building_features,
        routes: route_features,
    };
}
