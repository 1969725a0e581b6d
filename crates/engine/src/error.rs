// ---------------------------------------------------------------------------
// SimError: typed errors for programmer-error-class inputs
// ---------------------------------------------------------------------------
//
// Adverse-but-normal conditions (missing samples, zero buildings, empty
// routes, stale sample batches) are NOT errors; they produce well-defined
// degenerate outputs. Only inputs that would poison the math — non-positive
// building dimensions, NaN coordinates — are rejected, and they are rejected
// at the boundary before any grid state is touched.

use std::fmt;

/// Errors raised by the simulation kernels.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A building with non-positive (or non-finite) width/height. Rejected
    /// before volume computation to keep log/sqrt inputs sane.
    InvalidBuildingGeometry { width: f64, height: f64 },
    /// A coordinate containing NaN or an infinity.
    NonFiniteCoordinate { lon: f64, lat: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidBuildingGeometry { width, height } => write!(
                f,
                "invalid building geometry: width {width} m, height {height} m (both must be positive)"
            ),
            SimError::NonFiniteCoordinate { lon, lat } => {
                write!(f, "non-finite coordinate: lon {lon}, lat {lat}")
            }
        }
    }
}

impl std::error::Error for SimError {}
