//! Data-driven simulation parameters.
//!
//! Every constant of the AQI impact and route congestion models lives in the
//! [`SimParams`] resource so it can be tuned at runtime without
//! recompilation. The resource registers with the `Saveable` registry so
//! overrides persist alongside the rest of the twin state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingKind;
use crate::config;
use crate::Saveable;

/// Grid generation tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct GridParams {
    /// Side of the sampled square around the selected center, in degrees.
    pub large_square_side: f64,
    /// Divisions per axis; the grid has `divisions * divisions` cells.
    pub divisions: i32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            large_square_side: config::LARGE_SQUARE_SIDE,
            divisions: config::GRID_DIVISIONS,
        }
    }
}

/// Tunables of the building AQI impact model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct AqiImpactParams {
    /// Base AQI impact of an emitting building before size scaling.
    pub market_base_impact: f64,
    /// Hard ceiling on the impact radius in meters.
    pub max_impact_radius_m: f64,
    /// Volume below which size scaling contributes nothing, in cubic meters.
    pub min_building_size_m3: f64,
    /// Slope of the logarithmic size multiplier.
    pub size_impact_factor: f64,
    /// Ceiling on the AQI impact a single building can put on one cell.
    pub max_building_aqi_impact: f64,
    /// Ceiling on the summed AQI impact a cell accepts from all buildings.
    pub max_total_aqi_impact: f64,
    /// Building kinds that emit AQI impact; every other kind is inert.
    pub emitting_kinds: Vec<BuildingKind>,
}

impl Default for AqiImpactParams {
    fn default() -> Self {
        Self {
            market_base_impact: 20.0,
            max_impact_radius_m: 500.0,
            min_building_size_m3: 100.0,
            size_impact_factor: 0.0005,
            max_building_aqi_impact: 50.0,
            max_total_aqi_impact: 200.0,
            emitting_kinds: vec![BuildingKind::MarketShopping],
        }
    }
}

/// Tunables of the route congestion model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct CongestionParams {
    /// Buildings farther than this from a route coordinate are ignored, meters.
    pub impact_radius_m: f64,
    /// Scale applied to the combined distance/height/emission/kind factors.
    pub impact_scale: f64,
    /// Base traffic volume for routes created without one.
    pub default_base_traffic: f64,
}

impl Default for CongestionParams {
    fn default() -> Self {
        Self {
            impact_radius_m: 100.0,
            impact_scale: 20.0,
            default_base_traffic: config::DEFAULT_BASE_TRAFFIC,
        }
    }
}

/// All simulation tunables, grouped per model.
#[derive(
    Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
pub struct SimParams {
    pub grid: GridParams,
    pub aqi: AqiImpactParams,
    pub congestion: CongestionParams,
}

impl Saveable for SimParams {
    const SAVE_KEY: &'static str = "sim_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == SimParams::default() {
            return None; // nothing overridden, skip
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_model_constants() {
        let p = SimParams::default();
        assert_eq!(p.grid.large_square_side, 0.01);
        assert_eq!(p.grid.divisions, 6);
        assert_eq!(p.aqi.market_base_impact, 20.0);
        assert_eq!(p.aqi.max_impact_radius_m, 500.0);
        assert_eq!(p.aqi.min_building_size_m3, 100.0);
        assert_eq!(p.aqi.size_impact_factor, 0.0005);
        assert_eq!(p.aqi.max_building_aqi_impact, 50.0);
        assert_eq!(p.aqi.max_total_aqi_impact, 200.0);
        assert_eq!(p.aqi.emitting_kinds, vec![BuildingKind::MarketShopping]);
        assert_eq!(p.congestion.impact_radius_m, 100.0);
        assert_eq!(p.congestion.impact_scale, 20.0);
        assert_eq!(p.congestion.default_base_traffic, 50.0);
    }

    #[test]
    fn test_saveable_skips_default() {
        assert!(SimParams::default().save_to_bytes().is_none());
    }

    #[test]
    fn test_saveable_roundtrip() {
        let mut p = SimParams::default();
        p.aqi.market_base_impact = 35.0;
        p.grid.divisions = 10;
        let bytes = p.save_to_bytes().expect("non-default params should save");
        let loaded = SimParams::load_from_bytes(&bytes);
        assert_eq!(loaded, p);
    }
}
