//! The spatial AQI grid.
//!
//! A selected map center is partitioned into an N×N grid of cells; each cell
//! carries a baseline AQI sampled from an external feed and a list of
//! per-building impact contributions. Sampling fans out one task per cell on
//! the async compute pool and reduces results regardless of completion
//! order; every regeneration bumps a generation counter so a batch that
//! finishes after a newer grid has superseded it is discarded, never merged.

mod grid;
mod plugin;
mod sampling;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use grid::{attach_samples, generate_grid};
pub use plugin::AqiGridPlugin;
pub use sampling::{AqiSampler, FixedSampler, NullSampler, PendingSamples, SamplerHandle};
pub use systems::{begin_grid_regeneration, collect_sample_results, RegenerateGrid};
pub use types::{AqiGrid, Cell, ImpactEntry};
