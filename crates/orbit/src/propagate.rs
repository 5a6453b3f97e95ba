//! Orbit propagation to an observation time.

use std::f64::consts::{PI, TAU};

use crate::elements::Orbit;
use crate::kepler::{eccentric_anomaly, true_anomaly_of, KeplerError};

/// Instantaneous phase of the relative orbit.
#[derive(Debug, Clone, Copy)]
pub struct PhaseState {
    /// Mean anomaly (radians)
    pub mean_anom: f64,
    /// Eccentric anomaly (radians)
    pub ecc_anom: f64,
    /// True anomaly (radians)
    pub true_anom: f64,
    /// Separation in units of the semi-major axis: 1 − e·cos E
    pub sep: f64,
    /// cos ν
    pub cos_nu: f64,
    /// sin ν
    pub sin_nu: f64,
}

/// Full per-observation orbit state, including the light-time-corrected
/// per-star quantities.
///
/// Positions are (u, v, w) in units of the semi-major axis, with u and v
/// in the sky plane and w pointing at the observer.
#[derive(Debug, Clone, Copy)]
pub struct OrbitState {
    /// Phase of the relative orbit at the observation time
    pub phase: PhaseState,
    /// Argument of periastron of star 1 at this time (radians)
    pub omega1: f64,
    /// Argument of periastron of star 2: ω₁ + π
    pub omega2: f64,
    /// Inclination at this time (radians)
    pub incl: f64,
    /// Sky position of star 1 at its retarded time
    pub pos1: [f64; 3],
    /// Sky position of star 2 at its retarded time
    pub pos2: [f64; 3],
    /// Light-time corrected true anomaly of star 1
    pub nu1: f64,
    /// Light-time corrected true anomaly of star 2
    pub nu2: f64,
    /// Light-time corrected separation seen by star 1
    pub sep1: f64,
    /// Light-time corrected separation seen by star 2
    pub sep2: f64,
}

impl OrbitState {
    /// Projected centre-to-centre distance in units of the semi-major axis.
    pub fn sky_separation(&self) -> f64 {
        let du = self.pos2[0] - self.pos1[0];
        let dv = self.pos2[1] - self.pos1[1];
        du.hypot(dv)
    }

    /// True when star 1 is nearer the observer than star 2.
    pub fn star1_in_front(&self) -> bool {
        self.pos1[2] > self.pos2[2]
    }
}

impl Orbit {
    /// Phase of the relative orbit at time `t`.
    ///
    /// `M = 2π·frac((t − T_peri)/P)`, then Kepler's equation, then the
    /// separation `r = 1 − e·cos E` and the true anomaly.
    pub fn phase_state(&self, t: f64) -> Result<PhaseState, KeplerError> {
        let mean_anom = TAU * ((t - self.t_peri) / self.period_anom).rem_euclid(1.0);
        let ecc_anom = eccentric_anomaly(mean_anom, self.ecc)?;
        let true_anom = true_anomaly_of(ecc_anom, self.ecc);
        Ok(PhaseState {
            mean_anom,
            ecc_anom,
            true_anom,
            sep: 1.0 - self.ecc * ecc_anom.cos(),
            cos_nu: true_anom.cos(),
            sin_nu: true_anom.sin(),
        })
    }

    /// Full sky state at observation time `t`.
    ///
    /// Each star's sky position is evaluated at its own retarded time
    /// `t_k = t + a_lite·w_k`, where `w_k` is the star's line-of-sight
    /// coordinate from the zeroth-order solution (one correction pass, no
    /// iteration). With `a_lite = 0` the retarded times coincide with `t`.
    pub fn sky_state(&self, t: f64) -> Result<OrbitState, KeplerError> {
        let phase = self.phase_state(t)?;
        let omega1 = self.omega_at(t);
        let omega2 = omega1 + PI;
        let incl = self.incl_at(t);
        let (f1, f2) = self.mass_fractions();

        let w1 = star_position(&phase, omega1, incl, f1)[2];
        let w2 = star_position(&phase, omega2, incl, f2)[2];

        let (phase1, phase2) = if self.a_lite > 0.0 {
            (
                self.phase_state(t + self.a_lite * w1)?,
                self.phase_state(t + self.a_lite * w2)?,
            )
        } else {
            (phase, phase)
        };

        Ok(OrbitState {
            phase,
            omega1,
            omega2,
            incl,
            pos1: star_position(&phase1, omega1, incl, f1),
            pos2: star_position(&phase2, omega2, incl, f2),
            nu1: phase1.true_anom,
            nu2: phase2.true_anom,
            sep1: phase1.sep,
            sep2: phase2.sep,
        })
    }
}

/// Sky position (u, v, w) of a star at fraction `f` of the separation from
/// the centre of mass, given its argument of periastron.
fn star_position(phase: &PhaseState, omega: f64, incl: f64, f: f64) -> [f64; 3] {
    let theta = phase.true_anom + omega;
    let (st, ct) = theta.sin_cos();
    let (si, ci) = incl.sin_cos();
    [
        f * phase.sep * ct,
        f * phase.sep * st * ci,
        f * phase.sep * st * si,
    ]
}
