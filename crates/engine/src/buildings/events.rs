//! Building lifecycle events.

use bevy::prelude::*;

use crate::error::SimError;

use super::types::{BuildingPatch, BuildingSpec};

/// Request to place a new building.
#[derive(Event, Debug, Clone)]
pub struct PlaceBuilding {
    pub spec: BuildingSpec,
}

/// Request to edit an existing building. Unknown ids are logged and ignored.
#[derive(Event, Debug, Clone)]
pub struct EditBuilding {
    pub id: u64,
    pub patch: BuildingPatch,
}

/// Request to remove a building, retracting its AQI contributions.
#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveBuilding {
    pub id: u64,
}

/// A place/edit request was rejected at the validation boundary. Carries the
/// typed error so a caller can surface it; the grid is untouched.
#[derive(Event, Debug, Clone)]
pub struct BuildingRejected {
    /// The id the request targeted, if it had one.
    pub id: Option<u64>,
    pub error: SimError,
}

/// The building set changed (place/edit/remove succeeded). Downstream
/// consumers — route congestion, overlay — recompute from the new snapshot.
#[derive(Event, Debug, Clone, Copy)]
pub struct BuildingSetChanged;
