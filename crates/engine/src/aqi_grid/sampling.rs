//! The AQI sampler seam and the in-flight sampling batch.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::Task;

use crate::geo::LonLat;

/// External AQI feed adapter. Failure and timeout surface as `None`, never
/// as a panic or error; the merge step tolerates per-cell failures.
pub trait AqiSampler: Send + Sync + 'static {
    fn sample(&self, location: LonLat) -> Option<f64>;
}

/// Sampler that always fails. The engine's default until a real adapter is
/// installed; the grid then populates with all-unknown baselines.
pub struct NullSampler;

impl AqiSampler for NullSampler {
    fn sample(&self, _location: LonLat) -> Option<f64> {
        None
    }
}

/// Sampler returning one constant value, for tests and offline runs.
pub struct FixedSampler {
    pub aqi: f64,
}

impl AqiSampler for FixedSampler {
    fn sample(&self, _location: LonLat) -> Option<f64> {
        Some(self.aqi)
    }
}

/// The installed sampler, shared with fan-out tasks via `Arc`.
#[derive(Resource, Clone)]
pub struct SamplerHandle(pub Arc<dyn AqiSampler>);

impl Default for SamplerHandle {
    fn default() -> Self {
        Self(Arc::new(NullSampler))
    }
}

/// The in-flight sampling batch for one grid generation.
///
/// `tasks` holds `(cell_id, task)` pairs still running; finished results
/// accumulate in `results` until every cell has reported. A mismatch between
/// `generation` and the grid's current generation marks the whole batch
/// stale.
#[derive(Resource, Default)]
pub struct PendingSamples {
    pub generation: u64,
    pub tasks: Vec<(u32, Task<Option<f64>>)>,
    pub results: Vec<(u32, Option<f64>)>,
}

impl PendingSamples {
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty() && self.results.is_empty()
    }

    /// Drop everything in flight and retag for `generation`. Dropping a
    /// bevy `Task` cancels it.
    pub fn reset_for(&mut self, generation: u64) {
        self.tasks.clear();
        self.results.clear();
        self.generation = generation;
    }
}
