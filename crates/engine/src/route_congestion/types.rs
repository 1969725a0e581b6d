use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::LonLat;

/// A traffic route: an ordered polyline with a base traffic volume and the
/// congestion derived from it. `congestion` is never stored independently of
/// a recomputation trigger — it is rewritten in full whenever the building
/// set or the base volume changes.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: u64,
    /// At least 2 points; enforced at creation.
    pub coordinates: Vec<LonLat>,
    /// Base traffic volume in `[0, 100]`.
    pub base_traffic: f64,
    /// Derived congestion in `[0, 100]`.
    pub congestion: f64,
}

/// Monotonic route id allocation, honoring caller-assigned ids.
#[derive(Resource, Debug)]
pub struct RouteIdAllocator {
    next: u64,
}

impl Default for RouteIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl RouteIdAllocator {
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn reserve(&mut self, id: u64) {
        self.next = self.next.max(id.saturating_add(1));
    }
}
