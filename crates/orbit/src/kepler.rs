//! Kepler's equation and anomaly conversions.

use std::f64::consts::{PI, TAU};

use log::debug;
use thiserror::Error;

/// Convergence tolerance on the eccentric anomaly (radians).
const TOLERANCE: f64 = 1e-13;

/// Newton iterations before falling back to bisection.
const NEWTON_ITERS: usize = 30;

/// Bisection iterations before giving up.
const BISECT_ITERS: usize = 200;

/// Failure modes of the Kepler solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeplerError {
    /// Eccentricity outside the elliptic range [0, 1).
    #[error("eccentricity {0} outside [0, 1)")]
    InvalidEccentricity(f64),

    /// The iteration did not reach tolerance within its budget.
    #[error("Kepler solver did not converge for M={mean_anomaly}, e={eccentricity}")]
    NonConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
    },
}

/// Solves Kepler's equation `M = E − e·sin E` for the eccentric anomaly.
///
/// Newton-Raphson from a high-eccentricity-safe starting point, with a
/// bisection fallback on the bracket `[M − e, M + e]` (which always
/// contains the root, since `E − M = e·sin E`). The fallback keeps the
/// solver convergent for e close to 1, where Newton alone can overshoot.
///
/// # Arguments
/// * `mean_anomaly` - M in radians, any value (reduced internally)
/// * `eccentricity` - e ∈ [0, 1)
///
/// # Returns
/// Eccentric anomaly E such that `E − e·sin E = M` to ≈1e-13, in the same
/// cycle as the input mean anomaly.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(KeplerError::InvalidEccentricity(eccentricity));
    }

    let cycles = (mean_anomaly / TAU).floor();
    let m = mean_anomaly - cycles * TAU;

    // For large e and small M the classic E₀ = M start is far from the
    // root; E₀ = π is safe everywhere the simpler start is not.
    let mut ecc_anomaly = if eccentricity < 0.8 { m } else { PI };

    for _ in 0..NEWTON_ITERS {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - m;
        let f_prime = 1.0 - eccentricity * ecc_anomaly.cos();
        let delta = f / f_prime;
        ecc_anomaly -= delta;

        if delta.abs() < TOLERANCE {
            return Ok(ecc_anomaly + cycles * TAU);
        }
    }

    // Bisection rescue: monotone f on a bracket that always holds the root
    debug!("Newton stalled at M={m}, e={eccentricity}; falling back to bisection");
    let mut lo = m - eccentricity;
    let mut hi = m + eccentricity;
    for _ in 0..BISECT_ITERS {
        ecc_anomaly = 0.5 * (lo + hi);
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - m;
        if f > 0.0 {
            hi = ecc_anomaly;
        } else {
            lo = ecc_anomaly;
        }
        if hi - lo < TOLERANCE {
            return Ok(ecc_anomaly + cycles * TAU);
        }
    }

    Err(KeplerError::NonConvergence {
        mean_anomaly,
        eccentricity,
    })
}

/// Mean anomaly from eccentric anomaly: `M = E − e·sin E`.
pub fn mean_anomaly_of(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    ecc_anomaly - eccentricity * ecc_anomaly.sin()
}

/// True anomaly from eccentric anomaly.
///
/// Uses the half-angle identity `tan(ν/2) = √((1+e)/(1−e))·tan(E/2)`,
/// evaluated with atan2 so quadrants carry over and E = π poses no
/// problem.
pub fn true_anomaly_of(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * ecc_anomaly;
    let s = ((1.0 + eccentricity).sqrt()) * half.sin();
    let c = ((1.0 - eccentricity).sqrt()) * half.cos();
    2.0 * s.atan2(c)
}

/// Eccentric anomaly from true anomaly (inverse of [`true_anomaly_of`]).
pub fn eccentric_of_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * true_anomaly;
    let s = ((1.0 - eccentricity).sqrt()) * half.sin();
    let c = ((1.0 + eccentricity).sqrt()) * half.cos();
    2.0 * s.atan2(c)
}
