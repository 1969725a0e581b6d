//! Severity classification: scalar AQI / congestion values mapped to discrete
//! bands with display colors. Pure, total — every real number lands in
//! exactly one band (NaN compares false everywhere and falls through to the
//! worst band for AQI, the best for congestion; callers never produce NaN).

use serde::{Deserialize, Serialize};

/// US-EPA style AQI severity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn classify(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiBand::Good
        } else if aqi <= 100.0 {
            AqiBand::Moderate
        } else if aqi <= 150.0 {
            AqiBand::UnhealthySensitive
        } else if aqi <= 200.0 {
            AqiBand::Unhealthy
        } else if aqi <= 300.0 {
            AqiBand::VeryUnhealthy
        } else {
            AqiBand::Hazardous
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            AqiBand::Good => "#66ff66",
            AqiBand::Moderate => "#ffff66",
            AqiBand::UnhealthySensitive => "#ff9966",
            AqiBand::Unhealthy => "#ff6666",
            AqiBand::VeryUnhealthy => "#cc33cc",
            AqiBand::Hazardous => "#cc0000",
        }
    }
}

/// Route congestion severity bands over the 0..100 congestion scale.
/// Lower bounds are inclusive: exactly 60 classifies as `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CongestionBand {
    Low,
    Moderate,
    High,
    Severe,
}

impl CongestionBand {
    pub fn classify(congestion: f64) -> Self {
        if congestion >= 80.0 {
            CongestionBand::Severe
        } else if congestion >= 60.0 {
            CongestionBand::High
        } else if congestion >= 40.0 {
            CongestionBand::Moderate
        } else {
            CongestionBand::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CongestionBand::Severe => "#FF0000",
            CongestionBand::High => "#FFA500",
            CongestionBand::Moderate => "#FFFF00",
            CongestionBand::Low => "#00FF00",
        }
    }
}
