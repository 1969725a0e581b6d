//! Geographic coordinate type and the two distance functions used by the
//! simulation.
//!
//! The AQI model measures building-to-cell distances geodesically (haversine)
//! while the congestion model uses a cheap planar approximation. The two are
//! deliberately not unified: grid impact radii reach hundreds of meters where
//! the haversine error matters, route scanning runs per route coordinate per
//! building and only needs to resolve a 100 m cutoff.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mean Earth radius in meters, as used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of longitude/latitude at the equator.
pub const METERS_PER_DEGREE: f64 = 111_319.9;

/// A longitude/latitude pair in decimal degrees.
///
/// Canonical serialized form is the numeric 2-array `[lon, lat]`, matching
/// GeoJSON position ordering.
#[derive(Debug, Clone, Copy, PartialEq, bitcode::Encode, bitcode::Decode)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both components are finite (no NaN, no infinities).
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Geodesic distance to `other` in meters via the haversine formula.
    pub fn haversine_distance_m(self, other: LonLat) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// Planar approximate distance to `other` in meters: straight-line degree
    /// distance scaled by the equatorial meters-per-degree constant.
    pub fn planar_distance_m(self, other: LonLat) -> f64 {
        let d_lon = self.lon - other.lon;
        let d_lat = self.lat - other.lat;
        (d_lon * d_lon + d_lat * d_lat).sqrt() * METERS_PER_DEGREE
    }
}

impl Serialize for LonLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lon, self.lat].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LonLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lon, lat] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(LonLat { lon, lat })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        let p = LonLat::new(77.5946, 12.9716);
        assert_eq!(p.haversine_distance_m(p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // One degree of latitude is ~111.2 km on a 6371 km sphere.
        let a = LonLat::new(77.0, 12.0);
        let b = LonLat::new(77.0, 13.0);
        let d = a.haversine_distance_m(b);
        assert!((d - 111_194.9).abs() < 100.0, "got {d}");
    }

    #[test]
    fn test_planar_distance_uses_equatorial_constant() {
        let a = LonLat::new(77.0, 12.0);
        let b = LonLat::new(77.001, 12.0);
        let d = a.planar_distance_m(b);
        assert!((d - 111.3199).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_planar_and_haversine_disagree_off_equator() {
        // The planar approximation ignores latitude compression; the two
        // functions must stay distinct (the models depend on the asymmetry).
        let a = LonLat::new(77.0, 60.0);
        let b = LonLat::new(77.01, 60.0);
        let planar = a.planar_distance_m(b);
        let geodesic = a.haversine_distance_m(b);
        assert!((planar - geodesic).abs() > 100.0);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        assert!(LonLat::new(77.0, 12.0).is_finite());
        assert!(!LonLat::new(f64::NAN, 12.0).is_finite());
        assert!(!LonLat::new(77.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_serializes_as_numeric_pair() {
        let p = LonLat::new(77.5946, 12.9716);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[77.5946,12.9716]");
        let back: LonLat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
