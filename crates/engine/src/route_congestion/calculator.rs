//! Pure congestion computation.

use crate::buildings::Building;
use crate::sim_params::CongestionParams;

use super::types::Route;

/// Compute a route's congestion from the current building snapshot.
///
/// Starting from the route's base traffic volume, every route coordinate
/// accumulates impact from buildings strictly within the impact radius
/// (planar approximate distance): linear distance decay × height/100 ×
/// emission/100 × kind factor × the impact scale. The running total is
/// clamped to 100 after each coordinate, not just at the end, so long routes
/// through dense areas saturate instead of overflowing; the final value is
/// clamped to `[0, 100]`.
///
/// Deterministic in its inputs; callers recompute from scratch on every
/// building-set or base-traffic change.
pub fn compute_congestion(route: &Route, buildings: &[Building], params: &CongestionParams) -> f64 {
    let mut congestion = route.base_traffic;

    for coordinate in &route.coordinates {
        let mut coordinate_impact = 0.0;

        for building in buildings {
            let distance = coordinate.planar_distance_m(building.location);
            if distance >= params.impact_radius_m {
                continue;
            }
            let distance_factor = (1.0 - distance / params.impact_radius_m).max(0.0);
            let height_factor = building.height / 100.0;
            let emission_factor = building.emission / 100.0;
            let kind_factor = building.kind.congestion_factor();

            coordinate_impact +=
                distance_factor * height_factor * emission_factor * kind_factor * params.impact_scale;
        }

        congestion = (congestion + coordinate_impact).min(100.0);
    }

    congestion.clamp(0.0, 100.0)
}
