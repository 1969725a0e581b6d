//! Plugin registration for the AQI grid.

use bevy::prelude::*;

use super::sampling::{PendingSamples, SamplerHandle};
use super::systems::{begin_grid_regeneration, collect_sample_results, RegenerateGrid};
use super::types::AqiGrid;

pub struct AqiGridPlugin;

impl Plugin for AqiGridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AqiGrid>()
            .init_resource::<SamplerHandle>()
            .init_resource::<PendingSamples>()
            .add_event::<RegenerateGrid>()
            .add_systems(
                Update,
                (begin_grid_regeneration, collect_sample_results).chain(),
            );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<AqiGrid>();
    }
}
