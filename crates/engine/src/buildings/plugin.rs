//! Plugin registration for the building lifecycle.

use bevy::prelude::*;

use super::events::{
    BuildingRejected, BuildingSetChanged, EditBuilding, PlaceBuilding, RemoveBuilding,
};
use super::systems::handle_building_events;
use super::types::BuildingIdAllocator;

pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BuildingIdAllocator>()
            .add_event::<PlaceBuilding>()
            .add_event::<EditBuilding>()
            .add_event::<RemoveBuilding>()
            .add_event::<BuildingRejected>()
            .add_event::<BuildingSetChanged>()
            .add_systems(
                Update,
                handle_building_events.after(crate::aqi_grid::collect_sample_results),
            );
    }
}
