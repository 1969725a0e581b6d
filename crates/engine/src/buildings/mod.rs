//! Building lifecycle: placement, edits, removal.
//!
//! Buildings are ECS entities carrying a [`Building`] component. Mutations
//! arrive as events; the handler validates geometry at the boundary, keeps
//! the AQI grid's impact bookkeeping in sync (edit = retract + re-apply, so
//! re-application stays idempotent), and announces every successful change
//! via [`BuildingSetChanged`] for the congestion recompute downstream.

mod events;
mod plugin;
mod systems;
mod types;


pub use events::{
    BuildingRejected, BuildingSetChanged, EditBuilding, PlaceBuilding, RemoveBuilding,
};
pub use plugin::BuildingsPlugin;
pub use systems::handle_building_events;
pub use types::{Building, BuildingIdAllocator, BuildingKind, BuildingPatch, BuildingSpec};
