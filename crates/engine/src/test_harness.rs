//! # TestTwin — headless integration test harness
//!
//! Wraps `bevy::app::App` + `EnginePlugin` under `MinimalPlugins` so
//! integration tests can drive the twin through the same events a frontend
//! would, then query the resulting ECS state. Sampling tasks complete across
//! updates, so grid-dependent tests tick until the grid reports populated.

use std::sync::Arc;

use bevy::app::App;
use bevy::prelude::*;

use crate::aqi_grid::{AqiGrid, AqiSampler, RegenerateGrid, SamplerHandle};
use crate::buildings::{Building, BuildingSpec, EditBuilding, PlaceBuilding, RemoveBuilding};
use crate::geo::LonLat;
use crate::overlay::OverlaySnapshot;
use crate::route_congestion::{AddRoute, RemoveRoute, Route, SetRouteTraffic};
use crate::EnginePlugin;

pub struct TestTwin {
    app: App,
}

impl TestTwin {
    /// A twin with the default (always-failing) sampler installed.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(EnginePlugin);
        app.update();
        Self { app }
    }

    /// A twin with a specific sampler installed before anything runs.
    pub fn with_sampler(sampler: impl AqiSampler) -> Self {
        let mut twin = Self::new();
        twin.app
            .insert_resource(SamplerHandle(Arc::new(sampler)));
        twin
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.app.update();
    }

    /// Advance until the grid reports populated, panicking after `max_ticks`
    /// frames. Sampling runs on the async compute pool, so completion takes
    /// a nondeterministic (small) number of frames.
    pub fn tick_until_populated(&mut self, max_ticks: usize) {
        for _ in 0..max_ticks {
            self.app.update();
            if self.grid().populated {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        panic!("grid did not populate within {max_ticks} ticks");
    }

    // -----------------------------------------------------------------------
    // Commands (the same events a frontend sends)
    // -----------------------------------------------------------------------

    pub fn regenerate_grid(&mut self, center: LonLat) {
        self.app.world_mut().send_event(RegenerateGrid { center });
    }

    pub fn place_building(&mut self, spec: BuildingSpec) {
        self.app.world_mut().send_event(PlaceBuilding { spec });
    }

    pub fn edit_building(&mut self, event: EditBuilding) {
        self.app.world_mut().send_event(event);
    }

    pub fn remove_building(&mut self, id: u64) {
        self.app.world_mut().send_event(RemoveBuilding { id });
    }

    pub fn add_route(&mut self, coordinates: Vec<LonLat>, base_traffic: Option<f64>) {
        self.app.world_mut().send_event(AddRoute {
            id: None,
            coordinates,
            base_traffic,
        });
    }

    pub fn set_route_traffic(&mut self, id: u64, base_traffic: f64) {
        self.app
            .world_mut()
            .send_event(SetRouteTraffic { id, base_traffic });
    }

    pub fn remove_route(&mut self, id: u64) {
        self.app.world_mut().send_event(RemoveRoute { id });
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn grid(&self) -> &AqiGrid {
        self.app.world().resource::<AqiGrid>()
    }

    pub fn overlay(&self) -> &OverlaySnapshot {
        self.app.world().resource::<OverlaySnapshot>()
    }

    pub fn buildings(&mut self) -> Vec<Building> {
        let world = self.app.world_mut();
        let mut query = world.query::<&Building>();
        let mut list: Vec<Building> = query.iter(world).cloned().collect();
        list.sort_by_key(|b| b.id);
        list
    }

    pub fn routes(&mut self) -> Vec<Route> {
        let world = self.app.world_mut();
        let mut query = world.query::<&Route>();
        let mut list: Vec<Route> = query.iter(world).cloned().collect();
        list.sort_by_key(|r| r.id);
        list
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
