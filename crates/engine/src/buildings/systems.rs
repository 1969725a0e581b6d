//! Event handlers for the building lifecycle.

use bevy::prelude::*;

use crate::aqi_grid::AqiGrid;
use crate::building_impact::{apply_building_impact, retract_building_impact};
use crate::sim_params::SimParams;

use super::events::{
    BuildingRejected, BuildingSetChanged, EditBuilding, PlaceBuilding, RemoveBuilding,
};
use super::types::{Building, BuildingIdAllocator};

/// Applies place/edit/remove requests.
///
/// Validation happens here, before any grid mutation; rejected requests are
/// logged and re-emitted as [`BuildingRejected`] with the grid untouched.
/// Edits retract the old contribution and apply the new one, so a building's
/// impact entry per cell is always the upserted latest.
#[allow(clippy::too_many_arguments)]
pub fn handle_building_events(
    mut commands: Commands,
    mut place_events: EventReader<PlaceBuilding>,
    mut edit_events: EventReader<EditBuilding>,
    mut remove_events: EventReader<RemoveBuilding>,
    mut rejected: EventWriter<BuildingRejected>,
    mut set_changed: EventWriter<BuildingSetChanged>,
    mut alloc: ResMut<BuildingIdAllocator>,
    mut grid: ResMut<AqiGrid>,
    params: Res<SimParams>,
    mut buildings: Query<(Entity, &mut Building)>,
) {
    let mut mutated = false;

    for event in place_events.read() {
        let requested_id = event.spec.id;
        let building = event.spec.clone().into_building(&mut alloc);
        match building.validate() {
            Err(error) => {
                warn!("rejecting building placement: {error}");
                rejected.send(BuildingRejected {
                    id: requested_id,
                    error,
                });
            }
            Ok(()) => {
                // Geometry is valid, so the kernel cannot fail past this point.
                let _ = apply_building_impact(&building, &mut grid.cells, &params.aqi);
                commands.spawn(building);
                mutated = true;
            }
        }
    }

    for event in edit_events.read() {
        let Some((_, mut building)) = buildings.iter_mut().find(|(_, b)| b.id == event.id) else {
            warn!("edit for unknown building {}", event.id);
            continue;
        };
        let mut updated = building.clone();
        event.patch.apply_to(&mut updated);
        match updated.validate() {
            Err(error) => {
                warn!("rejecting edit of building {}: {error}", event.id);
                rejected.send(BuildingRejected {
                    id: Some(event.id),
                    error,
                });
            }
            Ok(()) => {
                retract_building_impact(event.id, &mut grid.cells, &params.aqi);
                let _ = apply_building_impact(&updated, &mut grid.cells, &params.aqi);
                *building = updated;
                mutated = true;
            }
        }
    }

    for event in remove_events.read() {
        let Some((entity, building)) = buildings.iter_mut().find(|(_, b)| b.id == event.id)
        else {
            warn!("removal of unknown building {}", event.id);
            continue;
        };
        retract_building_impact(building.id, &mut grid.cells, &params.aqi);
        commands.entity(entity).despawn();
        mutated = true;
    }

    if mutated {
        set_changed.send(BuildingSetChanged);
    }
}
