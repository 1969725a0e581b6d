//! The building AQI impact kernel: distance-decayed perturbation of grid
//! baselines by emitting buildings, and its exact inverse.

mod calculator;


pub use calculator::{apply_building_impact, retract_building_impact};
