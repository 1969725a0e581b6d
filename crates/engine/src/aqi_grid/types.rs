//! Cell and grid state types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::LonLat;
use crate::Saveable;

/// One building's AQI contribution to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct ImpactEntry {
    pub building_id: u64,
    pub value: f64,
}

/// One square sector of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct Cell {
    /// Row-major 1-based id, stable for a fixed division count.
    pub id: u32,
    pub centroid: LonLat,
    /// Closed 5-point boundary ring.
    pub boundary: [LonLat; 5],
    /// Sampled baseline AQI; `None` when the sampler failed for this cell.
    /// Unknown is distinguishable from a measured zero.
    pub original_aqi: Option<f64>,
    /// Baseline plus capped building impacts, rounded. Unknown baselines
    /// display as 0.
    pub current_aqi: f64,
    /// Per-building contributions, at most one entry per building id.
    pub impacts: Vec<ImpactEntry>,
}

impl Cell {
    /// Baseline used for display and recomputation: unknown reads as 0.
    pub fn baseline(&self) -> f64 {
        self.original_aqi.unwrap_or(0.0)
    }

    pub fn impact_sum(&self) -> f64 {
        self.impacts.iter().map(|e| e.value).sum()
    }

    /// Replace-or-insert this building's contribution (idempotent
    /// re-application after an edit).
    pub fn upsert_impact(&mut self, building_id: u64, value: f64) {
        match self.impacts.iter_mut().find(|e| e.building_id == building_id) {
            Some(entry) => entry.value = value,
            None => self.impacts.push(ImpactEntry { building_id, value }),
        }
    }

    /// Drop this building's contribution; returns whether an entry existed.
    pub fn remove_impact(&mut self, building_id: u64) -> bool {
        let before = self.impacts.len();
        self.impacts.retain(|e| e.building_id != building_id);
        self.impacts.len() != before
    }

    /// Re-derive `current_aqi` from the baseline and the capped impact sum.
    pub fn recompute_current(&mut self, max_total_impact: f64) {
        self.current_aqi = (self.baseline() + self.impact_sum().min(max_total_impact)).round();
    }
}

/// The grid resource.
///
/// `generation` increments on every regeneration; sampling batches are
/// tagged with it so stale fan-outs cannot overwrite a newer grid.
/// `populated` flips once every cell of the current generation has reported
/// (failed samples included — they stay `None`).
#[derive(Resource, Debug, Default, Clone, bitcode::Encode, bitcode::Decode)]
pub struct AqiGrid {
    pub cells: Vec<Cell>,
    pub center: Option<LonLat>,
    pub generation: u64,
    pub populated: bool,
}

impl AqiGrid {
    pub fn cell(&self, id: u32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }
}

impl Saveable for AqiGrid {
    const SAVE_KEY: &'static str = "aqi_grid";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.generation == 0 && self.cells.is_empty() {
            return None; // never generated, skip
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}
