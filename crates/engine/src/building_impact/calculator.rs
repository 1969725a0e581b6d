//! Pure impact computation over a cell slice; no ECS, no I/O.

use crate::aqi_grid::Cell;
use crate::buildings::Building;
use crate::error::SimError;
use crate::sim_params::AqiImpactParams;

/// Apply `building`'s AQI contribution to every cell within its impact
/// radius.
///
/// The model, in order:
/// 1. Non-emitting kinds are no-ops (the building exists, its impact is 0).
/// 2. `volume = width² × height`; the footprint is treated as a square.
/// 3. Size multiplier `max(1, ln(max(volume - min_size, 0) + 1) × factor)`
///    scales the base impact; small buildings stay at the base.
/// 4. Impact radius `min(√volume × 2, max_radius)` meters.
/// 5. Cells beyond the radius (geodesic centroid distance) are untouched —
///    no entry is added or changed for this building.
/// 6. Within the radius the impact decays logarithmically:
///    `ln(radius - distance + 1) / ln(radius + 1)`, rounded and clamped to
///    the per-building ceiling.
/// 7. The entry is upserted per building id, and `current_aqi` is re-derived
///    with the per-cell total cap. Re-applying identical geometry is
///    idempotent.
///
/// Geometry is validated before any cell is touched.
pub fn apply_building_impact(
    building: &Building,
    cells: &mut [Cell],
    params: &AqiImpactParams,
) -> Result<(), SimError> {
    building.validate()?;
    if !params.emitting_kinds.contains(&building.kind) {
        return Ok(());
    }

    let volume = building.volume_m3();
    let size_multiplier =
        (((volume - params.min_building_size_m3).max(0.0) + 1.0).ln() * params.size_impact_factor)
            .max(1.0);
    let base_impact = params.market_base_impact * size_multiplier;
    let impact_radius = (volume.sqrt() * 2.0).min(params.max_impact_radius_m);

    for cell in cells.iter_mut() {
        let distance = building.location.haversine_distance_m(cell.centroid);
        if distance > impact_radius {
            continue;
        }

        let impact_factor = (((impact_radius - distance) + 1.0).ln()
            / (impact_radius + 1.0).ln())
        .max(0.0);
        let impact = (base_impact * impact_factor)
            .round()
            .clamp(0.0, params.max_building_aqi_impact);

        cell.upsert_impact(building.id, impact);
        cell.recompute_current(params.max_total_aqi_impact);
    }

    Ok(())
}

/// Remove `building_id`'s contribution from every cell that has one and
/// re-derive those cells' `current_aqi`. A cell left with no impacts returns
/// to its baseline exactly.
pub fn retract_building_impact(building_id: u64, cells: &mut [Cell], params: &AqiImpactParams) {
    for cell in cells.iter_mut() {
        if cell.remove_impact(building_id) {
            cell.recompute_current(params.max_total_aqi_impact);
        }
    }
}
