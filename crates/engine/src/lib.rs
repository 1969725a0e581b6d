//! Headless urban digital-twin engine: a spatial AQI grid perturbed by
//! placed buildings, route congestion derived from the same building set,
//! and a render-ready overlay snapshot.
//!
//! Everything runs inside a bevy [`App`]; add [`EnginePlugin`] and drive the
//! twin through events (`RegenerateGrid`, `PlaceBuilding`, `AddRoute`, ...).
//! The engine owns no window and no renderer — frontends read
//! [`OverlaySnapshot`] and draw it however they like.

use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod aqi_grid;
pub mod building_impact;
pub mod buildings;
pub mod config;
pub mod error;
pub mod geo;
pub mod overlay;
pub mod route_congestion;
pub mod severity;
pub mod sim_params;

#[cfg(test)]
mod test_harness;

pub use aqi_grid::{
    AqiGrid, AqiGridPlugin, AqiSampler, Cell, FixedSampler, ImpactEntry, NullSampler,
    RegenerateGrid, SamplerHandle,
};
pub use building_impact::{apply_building_impact, retract_building_impact};
pub use buildings::{
    Building, BuildingIdAllocator, BuildingKind, BuildingPatch, BuildingRejected,
    BuildingSetChanged, BuildingSpec, BuildingsPlugin, EditBuilding, PlaceBuilding, RemoveBuilding,
};
pub use error::SimError;
pub use geo::LonLat;
pub use overlay::{OverlayPlugin, OverlaySnapshot};
pub use route_congestion::{
    AddRoute, RemoveRoute, Route, RouteCongestionPlugin, RouteIdAllocator, SetRouteTraffic,
};
pub use severity::{AqiBand, CongestionBand};
pub use sim_params::SimParams;

/// A resource that participates in persistence through the extension map of
/// a save payload.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Stable key for this resource in the extension map; changing it
    /// orphans existing payloads.
    const SAVE_KEY: &'static str;

    /// Serialize to bytes, or `None` to skip (resource at its default).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Restore from bytes. Decode failures must fall back, not panic; see
    /// [`decode_or_warn`].
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode via `bitcode::decode`, warning and returning the default on
/// failure. The standard body of a `Saveable::load_from_bytes`.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for one registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Registry of persistable resources, populated during plugin setup. A host
/// application iterates it to assemble or apply an extension map without
/// knowing the individual resource types.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a `Saveable` resource. Duplicate keys are ignored with a
    /// warning (debug builds assert) to prevent silent payload clobbering.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!("SaveableRegistry: duplicate key '{}', ignoring second registration", key);
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    /// Collect every registered resource's payload into an extension map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Apply an extension map. Absent keys leave the resource at whatever it
    /// currently holds (usually its `init_resource` default).
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Reset every registered resource to its default.
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

/// The whole engine: grid, buildings, routes, overlay, and the persistence
/// registry. Event-driven; safe to run under `MinimalPlugins` for headless
/// hosts and tests.
pub struct EnginePlugin;

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimParams>();

        app.init_resource::<SaveableRegistry>();
        app.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<SimParams>();

        app.add_plugins((
            AqiGridPlugin,
            BuildingsPlugin,
            RouteCongestionPlugin,
            OverlayPlugin,
        ));
    }
}
