//! Two-body orbit propagation for eclipsing-binary synthesis.
//!
//! Provides the Kepler-equation solver, the conversion between eclipse
//! epoch and periastron time, apsidal motion and inclination drift, the
//! per-star light-travel-time correction and the closed-form radial
//! velocities.
//!
//! # Conventions
//!
//! ω is the argument of periastron of star 1 (ω₂ = ω₁ + π). Star k sits at
//! `f_k·r·(cos(ν+ω_k), sin(ν+ω_k)·cos i, sin(ν+ω_k)·sin i)` in units of
//! the semi-major axis, with `f₁ = q/(1+q)`, `f₂ = 1/(1+q)` and w pointing
//! at the observer. The reference epoch T₀ is the conjunction with star 1
//! in front (ν + ω₁ = π/2), i.e. the eclipse of star 2.

pub mod elements;
pub mod kepler;
pub mod propagate;
pub mod rv;

#[cfg(test)]
mod kepler_test;
#[cfg(test)]
mod propagate_test;

pub use elements::Orbit;
pub use kepler::{eccentric_anomaly, mean_anomaly_of, true_anomaly_of, KeplerError};
pub use propagate::{OrbitState, PhaseState};
pub use rv::radial_velocities;
