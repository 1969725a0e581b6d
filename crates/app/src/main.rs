//! Headless demo host for the twin engine.
//!
//! Builds a small scenario around a Berlin center — a grid regeneration, a
//! few buildings, a route — runs the app until the grid is populated and
//! every derived value has settled, then prints the overlay snapshot as JSON
//! on stdout. No window, no renderer; a real frontend would read the same
//! snapshot and draw it.

use bevy::prelude::*;

use engine::{
    AddRoute, AqiSampler, BuildingKind, BuildingSpec, EnginePlugin, LonLat, OverlaySnapshot,
    PlaceBuilding, RegenerateGrid, SamplerHandle,
};

const CENTER: LonLat = LonLat { lon: 13.404954, lat: 52.520008 };

/// Deterministic offline baseline: a smooth field over the coordinate, in a
/// plausible urban AQI range. Stands in for a live feed adapter.
struct OfflineSampler;

impl AqiSampler for OfflineSampler {
    fn sample(&self, location: LonLat) -> Option<f64> {
        let ripple = (location.lon * 400.0).sin() + (location.lat * 400.0).cos();
        Some(55.0 + ripple * 18.0)
    }
}

fn main() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(bevy::log::LogPlugin::default())
        .add_plugins(EnginePlugin)
        .insert_resource(SamplerHandle(std::sync::Arc::new(OfflineSampler)))
        .add_systems(Startup, build_scenario);

    // Drive frames until sampling lands and the overlay reflects the full
    // scenario, then emit it. Bounded so a wedged sampler cannot hang the
    // demo forever.
    for _ in 0..1_000 {
        app.update();
        let populated = app.world().resource::<engine::AqiGrid>().populated;
        let overlay = app.world().resource::<OverlaySnapshot>();
        if populated && !overlay.buildings.is_empty() && !overlay.routes.is_empty() {
            app.update(); // one settle frame for the post-mutation recomputes
            break;
        }
    }

    let overlay = app.world().resource::<OverlaySnapshot>();
    match serde_json::to_string_pretty(overlay) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize overlay: {e}"),
    }
}

fn build_scenario(
    mut regenerate: EventWriter<RegenerateGrid>,
    mut place: EventWriter<PlaceBuilding>,
    mut routes: EventWriter<AddRoute>,
) {
    regenerate.send(RegenerateGrid { center: CENTER });

    place.send(PlaceBuilding {
        spec: BuildingSpec::new(CENTER, BuildingKind::MarketShopping).with_size(30.0, 50.0),
    });
    place.send(PlaceBuilding {
        spec: BuildingSpec::new(
            LonLat::new(CENTER.lon + 0.002, CENTER.lat),
            BuildingKind::Industrial,
        )
        .with_size(40.0, 80.0)
        .with_emission(90.0),
    });
    place.send(PlaceBuilding {
        spec: BuildingSpec::new(
            LonLat::new(CENTER.lon - 0.002, CENTER.lat + 0.001),
            BuildingKind::Residential,
        ),
    });

    routes.send(AddRoute {
        id: None,
        coordinates: vec![
            LonLat::new(CENTER.lon - 0.003, CENTER.lat),
            LonLat::new(CENTER.lon + 0.0019, CENTER.lat),
            LonLat::new(CENTER.lon + 0.004, CENTER.lat + 0.001),
        ],
        base_traffic: Some(40.0),
    });
}
