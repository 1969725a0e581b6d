//! Grid regeneration and sample collection systems.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool};

use crate::building_impact::apply_building_impact;
use crate::buildings::Building;
use crate::sim_params::SimParams;

use super::grid::{attach_samples, generate_grid};
use super::sampling::{PendingSamples, SamplerHandle};
use super::types::AqiGrid;
use crate::geo::LonLat;

/// Request to rebuild the grid around a new center. When several arrive in
/// one frame only the newest is honored; the others are superseded before
/// their sampling even starts.
#[derive(Event, Debug, Clone, Copy)]
pub struct RegenerateGrid {
    pub center: LonLat,
}

/// Rebuild the grid for the newest [`RegenerateGrid`] request and fan out
/// one sampling task per cell.
///
/// Cells are recreated from scratch; baselines and impact lists are never
/// carried over. Existing buildings re-apply once the new baselines land.
/// On wasm32 there is no thread pool, so sampling runs inline.
pub fn begin_grid_regeneration(
    mut events: EventReader<RegenerateGrid>,
    params: Res<SimParams>,
    sampler: Res<SamplerHandle>,
    mut grid: ResMut<AqiGrid>,
    mut pending: ResMut<PendingSamples>,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    let cells = match generate_grid(
        event.center,
        params.grid.large_square_side,
        params.grid.divisions,
    ) {
        Ok(cells) => cells,
        Err(error) => {
            warn!("grid regeneration rejected: {error}");
            return;
        }
    };

    grid.generation += 1;
    grid.center = Some(event.center);
    grid.cells = cells;
    grid.populated = false;
    pending.reset_for(grid.generation);

    if grid.cells.is_empty() {
        // divisions <= 0: nothing to sample.
        grid.populated = true;
        return;
    }

    if cfg!(target_arch = "wasm32") {
        pending.results = grid
            .cells
            .iter()
            .map(|cell| (cell.id, sampler.0.sample(cell.centroid)))
            .collect();
    } else {
        let pool = AsyncComputeTaskPool::get();
        for cell in &grid.cells {
            let sampler = Arc::clone(&sampler.0);
            let centroid = cell.centroid;
            pending
                .tasks
                .push((cell.id, pool.spawn(async move { sampler.sample(centroid) })));
        }
    }
}

/// Poll the in-flight sampling batch and finish the merge once every cell
/// has reported.
///
/// A batch whose generation no longer matches the grid is discarded without
/// touching any cell — the all-complete barrier only ever resolves for the
/// current generation. After the merge, every existing building re-applies
/// its impact onto the fresh baselines.
pub fn collect_sample_results(
    mut grid: ResMut<AqiGrid>,
    mut pending: ResMut<PendingSamples>,
    params: Res<SimParams>,
    buildings: Query<&Building>,
) {
    if pending.generation != grid.generation {
        if !pending.is_idle() {
            debug!(
                "discarding stale sample batch (generation {} superseded by {})",
                pending.generation, grid.generation
            );
            let generation = grid.generation;
            pending.reset_for(generation);
        }
        return;
    }
    if grid.populated || pending.is_idle() {
        return;
    }

    // Drain completed tasks into results; each task is polled exactly once
    // per frame.
    let in_flight = std::mem::take(&mut pending.tasks);
    let mut still_running = Vec::new();
    for (id, mut task) in in_flight {
        match block_on(futures_lite::future::poll_once(&mut task)) {
            Some(aqi) => pending.results.push((id, aqi)),
            None => still_running.push((id, task)),
        }
    }
    pending.tasks = still_running;

    if pending.tasks.is_empty() && pending.results.len() == grid.cells.len() {
        let results = std::mem::take(&mut pending.results);
        attach_samples(&mut grid.cells, &results, params.aqi.max_total_aqi_impact);
        for building in &buildings {
            // Geometry was validated at placement; the kernel cannot fail.
            let _ = apply_building_impact(building, &mut grid.cells, &params.aqi);
        }
        grid.populated = true;
    }
}
