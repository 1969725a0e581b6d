//! Building component, kind enumeration, and the spec/patch types carried by
//! lifecycle events.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_EMISSION;
use crate::error::SimError;
use crate::geo::{LonLat, METERS_PER_DEGREE};

/// Building-use categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub enum BuildingKind {
    Residential,
    /// "Market/Shopping Area" — the only kind emitting AQI impact by default.
    MarketShopping,
    Commercial,
    Industrial,
    Educational,
    Healthcare,
}

impl BuildingKind {
    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Residential => "Residential",
            BuildingKind::MarketShopping => "Market/Shopping Area",
            BuildingKind::Commercial => "Commercial",
            BuildingKind::Industrial => "Industrial",
            BuildingKind::Educational => "Educational",
            BuildingKind::Healthcare => "Healthcare",
        }
    }

    /// Weight of this kind in the route congestion model. Kinds without an
    /// entry in the original lookup fall back to 0.7.
    pub fn congestion_factor(self) -> f64 {
        match self {
            BuildingKind::Residential => 0.6,
            BuildingKind::Commercial => 0.8,
            BuildingKind::Industrial => 1.0,
            BuildingKind::Educational => 0.7,
            BuildingKind::Healthcare => 0.75,
            BuildingKind::MarketShopping => 0.7,
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            BuildingKind::Residential => "#4CAF50",
            BuildingKind::MarketShopping => "#FF9800",
            BuildingKind::Commercial => "#2196F3",
            BuildingKind::Industrial => "#FF5722",
            BuildingKind::Educational => "#9C27B0",
            BuildingKind::Healthcare => "#E91E63",
        }
    }
}

/// A placed building.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u64,
    pub location: LonLat,
    /// Footprint side length in meters (footprint is a square).
    pub width: f64,
    /// Height in meters.
    pub height: f64,
    /// Footprint rotation in degrees, normalized to `[0, 360)`.
    pub rotation: f64,
    pub kind: BuildingKind,
    /// Emission score in `[0, 100]`, used by the congestion model.
    pub emission: f64,
    /// Display-only color.
    pub color: String,
}

impl Building {
    /// Rejects geometry that would poison the impact math. Must be called
    /// before any grid mutation.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.location.is_finite() {
            return Err(SimError::NonFiniteCoordinate {
                lon: self.location.lon,
                lat: self.location.lat,
            });
        }
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(SimError::InvalidBuildingGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Volume with the footprint treated as a `width × width` square.
    pub fn volume_m3(&self) -> f64 {
        self.width * self.width * self.height
    }

    /// Footprint polygon: a closed 5-point ring, rotated by `rotation`
    /// around the building location. Degree conversion uses the equatorial
    /// constant, same as the congestion distance approximation.
    pub fn footprint(&self) -> [LonLat; 5] {
        let half = (self.width / 2.0) / METERS_PER_DEGREE;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let locals = [(-half, -half), (half, -half), (half, half), (-half, half)];

        let mut ring = [self.location; 5];
        for (corner, (dx, dy)) in ring.iter_mut().zip(locals) {
            *corner = LonLat::new(
                self.location.lon + dx * cos - dy * sin,
                self.location.lat + dx * sin + dy * cos,
            );
        }
        ring[4] = ring[0];
        ring
    }
}

/// Allocates monotonic building ids, honoring caller-assigned ids by always
/// staying ahead of the largest id seen.
#[derive(Resource, Debug)]
pub struct BuildingIdAllocator {
    next: u64,
}

impl Default for BuildingIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl BuildingIdAllocator {
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn reserve(&mut self, id: u64) {
        self.next = self.next.max(id.saturating_add(1));
    }
}

/// Requested building, as carried by [`super::PlaceBuilding`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Caller-assigned id; `None` lets the allocator pick one.
    pub id: Option<u64>,
    pub location: LonLat,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub kind: BuildingKind,
    pub emission: f64,
    /// Display color override; `None` uses the kind's default.
    pub color: Option<String>,
}

impl BuildingSpec {
    pub fn new(location: LonLat, kind: BuildingKind) -> Self {
        Self {
            id: None,
            location,
            width: 20.0,
            height: 30.0,
            rotation: 0.0,
            kind,
            emission: DEFAULT_EMISSION,
            color: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_emission(mut self, emission: f64) -> Self {
        self.emission = emission;
        self
    }

    pub(crate) fn into_building(self, alloc: &mut BuildingIdAllocator) -> Building {
        let id = match self.id {
            Some(id) => {
                alloc.reserve(id);
                id
            }
            None => alloc.allocate(),
        };
        let kind = self.kind;
        Building {
            id,
            location: self.location,
            width: self.width,
            height: self.height,
            rotation: self.rotation.rem_euclid(360.0),
            kind,
            emission: self.emission.clamp(0.0, 100.0),
            color: self.color.unwrap_or_else(|| kind.default_color().to_string()),
        }
    }
}

/// Partial update for [`super::EditBuilding`]; `None` fields keep their
/// current value. Any geometry field change invalidates the footprint and
/// the building's AQI contribution, both of which are recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingPatch {
    pub location: Option<LonLat>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub kind: Option<BuildingKind>,
    pub emission: Option<f64>,
    pub color: Option<String>,
}

impl BuildingPatch {
    pub fn apply_to(&self, building: &mut Building) {
        if let Some(location) = self.location {
            building.location = location;
        }
        if let Some(width) = self.width {
            building.width = width;
        }
        if let Some(height) = self.height {
            building.height = height;
        }
        if let Some(rotation) = self.rotation {
            building.rotation = rotation.rem_euclid(360.0);
        }
        if let Some(kind) = self.kind {
            building.kind = kind;
        }
        if let Some(emission) = self.emission {
            building.emission = emission.clamp(0.0, 100.0);
        }
        if let Some(ref color) = self.color {
            building.color = color.clone();
        }
    }
}
