//! Render-ready snapshot of the whole twin.
//!
//! The engine never draws; instead it maintains [`OverlaySnapshot`], a plain
//! serializable resource of feature collections (cells, buildings, routes)
//! that a frontend can hand straight to a map layer. The snapshot is rebuilt
//! in full whenever any of its inputs change, so readers never see a
//! half-updated frame.

mod plugin;
mod systems;
mod types;


pub use plugin::OverlayPlugin;
pub use systems::rebuild_overlay;
pub use types::{BuildingFeature, CellFeature, OverlaySnapshot, RouteFeature};
