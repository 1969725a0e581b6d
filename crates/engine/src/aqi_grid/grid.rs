//! Pure grid construction and sample merging.

use crate::error::SimError;
use crate::geo::LonLat;

use super::types::Cell;

/// Partition a square of side `large_square_side` degrees centered at
/// `center` into `divisions × divisions` cells.
///
/// Cell `(i, j)` gets id `i * divisions + j + 1` (row-major, 1-based) and
/// spans `[offset - side, offset]` on both axes, where
/// `offset = center + (index - divisions/2) * side`; the centroid is the
/// offset minus half a side in each axis — the exact geometric center of the
/// boundary ring.
///
/// Lenient by design: `divisions <= 0` yields an empty grid and
/// `large_square_side <= 0` yields zero-area cells, neither is an error.
/// A non-finite center is a programmer error and is rejected.
pub fn generate_grid(
    center: LonLat,
    large_square_side: f64,
    divisions: i32,
) -> Result<Vec<Cell>, SimError> {
    if !center.is_finite() {
        return Err(SimError::NonFiniteCoordinate {
            lon: center.lon,
            lat: center.lat,
        });
    }
    if divisions <= 0 {
        return Ok(Vec::new());
    }

    let side = large_square_side / divisions as f64;
    let half_span = divisions as f64 / 2.0;
    let mut cells = Vec::with_capacity((divisions * divisions) as usize);

    for i in 0..divisions {
        for j in 0..divisions {
            let offset_lng = center.lon + (i as f64 - half_span) * side;
            let offset_lat = center.lat + (j as f64 - half_span) * side;

            let (x0, x1) = (offset_lng - side, offset_lng);
            let (y0, y1) = (offset_lat - side, offset_lat);

            cells.push(Cell {
                id: (i * divisions + j + 1) as u32,
                centroid: LonLat::new(offset_lng - side / 2.0, offset_lat - side / 2.0),
                boundary: [
                    LonLat::new(x0, y1),
                    LonLat::new(x1, y1),
                    LonLat::new(x1, y0),
                    LonLat::new(x0, y0),
                    LonLat::new(x0, y1),
                ],
                original_aqi: None,
                current_aqi: 0.0,
                impacts: Vec::new(),
            });
        }
    }

    Ok(cells)
}

/// Merge sampled baselines into the grid. Order-independent across cells:
/// each `(cell_id, aqi)` pair only touches its own cell. Failed samples
/// (`None`) keep the cell's baseline unknown without fabricating a
/// measurement; ids with no matching cell are ignored.
pub fn attach_samples(
    cells: &mut [Cell],
    samples: &[(u32, Option<f64>)],
    max_total_impact: f64,
) {
    for &(id, aqi) in samples {
        if let Some(cell) = cells.iter_mut().find(|c| c.id == id) {
            cell.original_aqi = aqi;
            cell.recompute_current(max_total_impact);
        }
    }
}
