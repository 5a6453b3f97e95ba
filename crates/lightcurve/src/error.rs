//! Error types of the synthesis engine.
//!
//! Input errors invalidate the whole call and surface through `Result`;
//! numeric failures are per-observation, folded into the flag word by the
//! orchestrator so the loop continues over the remaining observations.

use orbit::KeplerError;
use thiserror::Error;

/// Invalid user input detected at setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A fractional radius exceeds the Roche limit at periastron.
    #[error("star {star} radius {radius} exceeds Roche limit {limit} at periastron")]
    RadiusAboveRocheLimit { star: u8, radius: f64, limit: f64 },

    /// A fractional radius must be positive.
    #[error("star {star} radius {radius} is not positive")]
    RadiusNotPositive { star: u8, radius: f64 },

    /// Fluid Love number outside the physical range [0, 5/2].
    #[error("star {star} fluid Love number {value} outside [0, 5/2]")]
    LoveNumberOutOfRange { star: u8, value: f64 },

    /// Eccentricity must lie in [0, 1).
    #[error("eccentricity {0} outside [0, 1)")]
    EccentricityOutOfRange(f64),

    /// Third light must lie in [0, 1).
    #[error("third light fraction {0} outside [0, 1)")]
    ThirdLightOutOfRange(f64),

    /// The period must be positive.
    #[error("period {0} is not positive")]
    PeriodNotPositive(f64),

    /// The star-shape iteration failed for the given parameters.
    #[error("no equilibrium figure found for star {star}")]
    ShapeNotConverged { star: u8 },

    /// The positional parameter array has the wrong length.
    #[error("parameter array has {found} entries, expected {expected}")]
    ParameterCount { expected: usize, found: usize },

    /// The column-major spot array cannot hold the requested spots.
    #[error("spot array of {len} values cannot hold {n_spot} spots of {n_par} parameters")]
    SpotLayout {
        len: usize,
        n_par: usize,
        n_spot: usize,
    },

    /// Unknown limb-darkening law tag.
    #[error("unknown limb-darkening tag {0}")]
    UnknownLdTag(i32),

    /// Unknown shape-model tag.
    #[error("unknown shape-model tag {0}")]
    UnknownShapeTag(i32),

    /// The tabulated limb-darkening tag was set without a μ-grid.
    #[error("tabulated limb darkening selected for star {0} but no mu-grid supplied")]
    MissingMuGrid(u8),

    /// A μ-grid needs at least two samples.
    #[error("mu-grid needs at least two entries, got {0}")]
    MuGridTooShort(usize),
}

/// Numerical failure inside a primitive; per-observation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    /// The Kepler solver failed.
    #[error(transparent)]
    Kepler(#[from] KeplerError),

    /// The star-shape volume iteration did not converge.
    #[error("shape volume iteration did not converge for radius {radius}")]
    ShapeNonConvergence { radius: f64 },

    /// Ellipse intersection root polishing failed.
    #[error("ellipse intersection root polish failed")]
    IntersectionFailed,
}
