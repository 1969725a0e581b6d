/// Default side length of the sampled square around a selected center, in
/// degrees.
pub const LARGE_SQUARE_SIDE: f64 = 0.01;

/// Default number of grid divisions per axis (6 -> 36 cells).
pub const GRID_DIVISIONS: i32 = 6;

/// Base traffic volume assigned to a route when the caller leaves it unset.
pub const DEFAULT_BASE_TRAFFIC: f64 = 50.0;

/// Emission score assigned to a building when the caller leaves it unset.
pub const DEFAULT_EMISSION: f64 = 50.0;
