use bevy::prelude::*;

use super::systems::rebuild_overlay;
use super::types::OverlaySnapshot;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlaySnapshot>().add_systems(
            Update,
            rebuild_overlay.after(crate::route_congestion::recompute_congestion),
        );
    }
}
