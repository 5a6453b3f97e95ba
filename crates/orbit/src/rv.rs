//! Closed-form centre-of-mass radial velocities (the rv-only fast path).

use std::f64::consts::TAU;

use units::Velocity;

use crate::elements::Orbit;
use crate::kepler::KeplerError;

/// Centre-of-mass radial velocities of both stars at time `t`, positive
/// for recession.
///
/// Bypasses all flux machinery:
/// `rv_k = −v_orb·f_k·sin i·(cos(ν_k + ω_k) + e·cos ω_k)` with
/// `v_orb = 2πa/(P√(1−e²))`, each star evaluated at its light-time
/// corrected true anomaly. The light-time correction is applied here
/// unconditionally, matching the historical behaviour of the fast path
/// (the flux path gates velocity output on a > 0).
///
/// With a ≤ 0 there is no velocity scale and both outputs are zero.
pub fn radial_velocities(orbit: &Orbit, t: f64) -> Result<(Velocity, Velocity), KeplerError> {
    let state = orbit.sky_state(t)?;
    let (f1, f2) = orbit.mass_fractions();

    let v_orb = TAU * orbit.semi_major
        / (orbit.period_anom * (1.0 - orbit.ecc * orbit.ecc).sqrt());
    let si = state.incl.sin();
    let e = orbit.ecc;

    // w points at the observer, so recession is −dw/dt
    let rv1 = -f1 * v_orb * si * ((state.nu1 + state.omega1).cos() + e * state.omega1.cos());
    let rv2 = -f2 * v_orb * si * ((state.nu2 + state.omega2).cos() + e * state.omega2.cos());

    Ok((
        Velocity::from_solar_radii_per_day(rv1),
        Velocity::from_solar_radii_per_day(rv2),
    ))
}
