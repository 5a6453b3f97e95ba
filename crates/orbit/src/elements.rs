//! Orbital elements of the binary, including their slow time evolution.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use units::constants::LIGHT_TIME_SOLAR_RADIUS_DAYS;

use crate::kepler::{eccentric_of_true, mean_anomaly_of, KeplerError};

/// Orbital elements prepared for propagation.
///
/// Built once per synthesis call; immutable afterwards. Times are in days,
/// angles in radians. Apsidal motion and inclination drift are linear in
/// time, with rates quoted per sidereal period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orbit {
    /// Reference epoch after the light-time correction (days)
    pub t_zero: f64,
    /// Anomalistic period (days)
    pub period_anom: f64,
    /// Sidereal period P·(1 − ω̇/2π) (days)
    pub period_sid: f64,
    /// Time of the periastron passage immediately before `t_zero` (days)
    pub t_peri: f64,
    /// Eccentricity
    pub ecc: f64,
    /// Argument of periastron of star 1 at `t_zero` (radians)
    pub omega_zero: f64,
    /// Inclination at `t_zero` (radians)
    pub incl_zero: f64,
    /// Apsidal motion rate (radians per sidereal period)
    pub domega_dt: f64,
    /// Inclination drift rate (radians per sidereal period)
    pub dincl_dt: f64,
    /// Mass ratio m₂/m₁
    pub mass_ratio: f64,
    /// Semi-major axis in solar radii; 0 when unknown (a ≤ 0 at the
    /// boundary), which disables velocities and light-time handling
    pub semi_major: f64,
    /// Light travel time across the semi-major axis (days)
    pub a_lite: f64,
}

impl Orbit {
    /// Assembles the orbit from boundary parameters.
    ///
    /// `t_zero` is the observed time of the reference eclipse (star 2
    /// eclipsed, star 1 in front). The Rømer delay of that eclipse is
    /// removed up front with the closed form of Borkovits et al. (2015),
    /// and the periastron time is derived from the corrected epoch.
    ///
    /// # Arguments
    /// * `t_zero` - observed reference eclipse time (days)
    /// * `period_anom` - anomalistic period (days)
    /// * `ecc` - eccentricity
    /// * `omega_zero` - argument of periastron of star 1 at T₀ (radians)
    /// * `incl_zero` - inclination at T₀ (radians)
    /// * `domega_dt` - apsidal motion rate (radians per sidereal period)
    /// * `dincl_dt` - inclination drift (radians per sidereal period)
    /// * `mass_ratio` - q = m₂/m₁
    /// * `semi_major_solar` - semi-major axis in solar radii; ≤ 0 disables
    ///   light-time handling
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t_zero: f64,
        period_anom: f64,
        ecc: f64,
        omega_zero: f64,
        incl_zero: f64,
        domega_dt: f64,
        dincl_dt: f64,
        mass_ratio: f64,
        semi_major_solar: f64,
    ) -> Result<Self, KeplerError> {
        if !(0.0..1.0).contains(&ecc) {
            return Err(KeplerError::InvalidEccentricity(ecc));
        }

        let period_sid = period_anom * (1.0 - domega_dt / TAU);
        let semi_major = semi_major_solar.max(0.0);
        let a_lite = semi_major * LIGHT_TIME_SOLAR_RADIUS_DAYS;

        let t_zero_corr =
            t_zero - romer_epoch_delay(a_lite, incl_zero, ecc, omega_zero, mass_ratio);
        let t_peri = periastron_time(t_zero_corr, ecc, omega_zero, period_anom);

        Ok(Self {
            t_zero: t_zero_corr,
            period_anom,
            period_sid,
            t_peri,
            ecc,
            omega_zero,
            incl_zero,
            domega_dt,
            dincl_dt,
            mass_ratio,
            semi_major,
            a_lite,
        })
    }

    /// Argument of periastron of star 1 at time `t`.
    pub fn omega_at(&self, t: f64) -> f64 {
        self.omega_zero + (t - self.t_zero) * self.domega_dt / self.period_sid
    }

    /// Inclination at time `t`.
    pub fn incl_at(&self, t: f64) -> f64 {
        self.incl_zero + (t - self.t_zero) * self.dincl_dt / self.period_sid
    }

    /// Fractional distances of the two stars from the centre of mass,
    /// in units of the separation: (q/(1+q), 1/(1+q)).
    pub fn mass_fractions(&self) -> (f64, f64) {
        let q = self.mass_ratio;
        (q / (1.0 + q), 1.0 / (1.0 + q))
    }
}

/// Eccentricity and argument of periastron from the eccentricity vector
/// (√e·cos ω, √e·sin ω).
///
/// The square-root parameterization keeps the fit space well conditioned
/// near e = 0; ω defaults to π/2 for a circular orbit so that the
/// reference conjunction falls at ν = 0.
pub fn eccentricity_vector(f_c: f64, f_s: f64) -> (f64, f64) {
    let ecc = f_c * f_c + f_s * f_s;
    if ecc == 0.0 {
        (0.0, FRAC_PI_2)
    } else {
        (ecc, f_s.atan2(f_c))
    }
}

/// Periastron passage immediately before the (corrected) eclipse time.
///
/// Inverts the eclipse condition ν + ω₁ = π/2: the true anomaly of the
/// reference conjunction is ν = π/2 − ω, which converts to a mean anomaly
/// through the eccentric anomaly; the periastron time follows from the
/// mean motion.
pub fn periastron_time(t_eclipse: f64, ecc: f64, omega: f64, period_anom: f64) -> f64 {
    let nu_ecl = FRAC_PI_2 - omega;
    let ecc_anom = eccentric_of_true(nu_ecl, ecc);
    let mean_anom = mean_anomaly_of(ecc_anom, ecc).rem_euclid(TAU);
    t_eclipse - period_anom * mean_anom / TAU
}

/// Rømer delay of the reference eclipse time.
///
/// Closed form after Borkovits et al. (2015): the light-time asymmetry of
/// the conjunction scales with (1 − q)/(1 + q) and the separation at
/// conjunction (1 − e²)/(1 + e·sin ω). Identically zero for equal masses
/// or when the semi-major axis is unknown.
pub fn romer_epoch_delay(a_lite: f64, incl: f64, ecc: f64, omega: f64, mass_ratio: f64) -> f64 {
    let sep = (1.0 - ecc * ecc) / (1.0 + ecc * omega.sin());
    a_lite * incl.sin() * (1.0 - mass_ratio) / (1.0 + mass_ratio) * sep
}
