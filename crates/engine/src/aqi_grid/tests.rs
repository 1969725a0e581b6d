use super::*;
use crate::geo::LonLat;
use crate::Saveable;

const CENTER: LonLat = LonLat { lon: 13.40, lat: 52.52 };

fn default_grid() -> Vec<Cell> {
    generate_grid(CENTER, 0.01, 6).unwrap()
}

#[test]
fn test_default_grid_has_36_stable_ids() {
    let cells = default_grid();
    assert_eq!(cells.len(), 36);
    let ids: Vec<u32> = cells.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=36).collect::<Vec<u32>>());
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(default_grid(), default_grid());
}

#[test]
fn test_cell_geometry() {
    let cells = default_grid();
    let side = 0.01 / 6.0;

    for cell in &cells {
        // Closed ring.
        assert_eq!(cell.boundary[0], cell.boundary[4]);
        // Centroid sits at the exact center of the ring.
        let lon_mid = (cell.boundary[0].lon + cell.boundary[1].lon) / 2.0;
        let lat_mid = (cell.boundary[1].lat + cell.boundary[2].lat) / 2.0;
        assert!((cell.centroid.lon - lon_mid).abs() < 1e-12);
        assert!((cell.centroid.lat - lat_mid).abs() < 1e-12);
        // Square of the expected side.
        assert!(((cell.boundary[1].lon - cell.boundary[0].lon) - side).abs() < 1e-12);
        // Fresh cells have no baseline and no impacts.
        assert_eq!(cell.original_aqi, None);
        assert_eq!(cell.current_aqi, 0.0);
        assert!(cell.impacts.is_empty());
    }
}

#[test]
fn test_ids_are_row_major() {
    let cells = generate_grid(CENTER, 0.01, 3).unwrap();
    // Cell (i, j) -> id i * divisions + j + 1; consecutive j share an i-row
    // (same longitude offset).
    assert_eq!(cells[0].id, 1);
    assert_eq!(cells[1].id, 2);
    assert_eq!(cells[0].centroid.lon, cells[1].centroid.lon);
    assert!(cells[0].centroid.lat < cells[1].centroid.lat);
    // Next i-row steps in longitude.
    assert_eq!(cells[3].id, 4);
    assert!(cells[0].centroid.lon < cells[3].centroid.lon);
}

#[test]
fn test_zero_divisions_yields_empty_grid() {
    assert!(generate_grid(CENTER, 0.01, 0).unwrap().is_empty());
    assert!(generate_grid(CENTER, 0.01, -3).unwrap().is_empty());
}

#[test]
fn test_zero_side_yields_degenerate_cells() {
    let cells = generate_grid(CENTER, 0.0, 6).unwrap();
    assert_eq!(cells.len(), 36);
    for cell in &cells {
        assert_eq!(cell.centroid, CENTER);
        assert_eq!(cell.boundary[0], cell.boundary[2]);
    }
}

#[test]
fn test_non_finite_center_is_rejected() {
    let result = generate_grid(LonLat::new(f64::NAN, 52.52), 0.01, 6);
    assert!(matches!(
        result,
        Err(crate::SimError::NonFiniteCoordinate { .. })
    ));
}

#[test]
fn test_attach_samples_is_order_independent() {
    let samples = [(1_u32, Some(40.0)), (2, None), (36, Some(75.4))];
    let mut forward = default_grid();
    attach_samples(&mut forward, &samples, 200.0);

    let mut reversed_samples = samples;
    reversed_samples.reverse();
    let mut backward = default_grid();
    attach_samples(&mut backward, &reversed_samples, 200.0);

    assert_eq!(forward, backward);
    assert_eq!(forward[0].original_aqi, Some(40.0));
    assert_eq!(forward[0].current_aqi, 40.0);
    assert_eq!(forward[1].original_aqi, None);
    // Fractional baselines round on recompute.
    assert_eq!(forward[35].current_aqi, 75.0);
}

#[test]
fn test_attach_samples_ignores_unknown_ids() {
    let mut cells = default_grid();
    let before = cells.clone();
    attach_samples(&mut cells, &[(999, Some(50.0))], 200.0);
    assert_eq!(cells, before);
}

#[test]
fn test_cell_impact_bookkeeping() {
    let mut cell = default_grid().remove(0);
    cell.original_aqi = Some(60.0);

    cell.upsert_impact(7, 15.0);
    cell.upsert_impact(8, 10.0);
    cell.recompute_current(200.0);
    assert_eq!(cell.current_aqi, 85.0);

    // Upsert replaces, never duplicates.
    cell.upsert_impact(7, 5.0);
    cell.recompute_current(200.0);
    assert_eq!(cell.impacts.len(), 2);
    assert_eq!(cell.current_aqi, 75.0);

    assert!(cell.remove_impact(7));
    assert!(!cell.remove_impact(7));
    cell.recompute_current(200.0);
    assert_eq!(cell.current_aqi, 70.0);
}

#[test]
fn test_grid_saveable_roundtrip() {
    let mut grid = AqiGrid::default();
    assert!(grid.save_to_bytes().is_none(), "never-generated grid skips saving");

    grid.cells = default_grid();
    grid.center = Some(CENTER);
    grid.generation = 3;
    grid.populated = true;
    let bytes = grid.save_to_bytes().unwrap();
    let loaded = AqiGrid::load_from_bytes(&bytes);
    assert_eq!(loaded.cells, grid.cells);
    assert_eq!(loaded.generation, 3);
    assert!(loaded.populated);
}
