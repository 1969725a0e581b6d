use bevy::prelude::*;
use serde::Serialize;

use crate::geo::LonLat;
use crate::severity::{AqiBand, CongestionBand};

/// One grid cell, ready to draw as a filled polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFeature {
    pub id: u32,
    /// Closed 5-point boundary ring.
    pub boundary: [LonLat; 5],
    pub aqi: f64,
    /// `false` when the baseline sample failed; the cell still displays,
    /// with its AQI derived from a zero baseline.
    pub measured: bool,
    pub band: AqiBand,
    pub color: String,
}

/// One building, ready to draw as an extruded footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingFeature {
    pub id: u64,
    /// Closed 5-point footprint ring, rotation applied.
    pub footprint: [LonLat; 5],
    pub kind: String,
    pub height: f64,
    pub color: String,
}

/// One route, ready to draw as a colored polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFeature {
    pub id: u64,
    pub coordinates: Vec<LonLat>,
    pub congestion: f64,
    pub band: CongestionBand,
    pub color: String,
}

/// The complete drawable state. Rebuilt atomically; features are sorted by
/// id so serialized output is stable across runs.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    pub cells: Vec<CellFeature>,
    pub buildings: Vec<BuildingFeature>,
    pub routes: Vec<RouteFeature>,
}
