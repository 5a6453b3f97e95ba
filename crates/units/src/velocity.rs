use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::constants::{SOLAR_RADII_PER_DAY_TO_KM_S, SPEED_OF_LIGHT_KM_S};

/// A line-of-sight or orbital velocity using f64 precision.
///
/// Velocities are stored in km/s, the unit of the public radial-velocity
/// output columns. Orbital mechanics naturally produces solar radii per
/// day (semi-major axis in R☉, period in days), so that constructor is
/// provided as well.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: km/s

impl Velocity {
    /// Creates a zero velocity.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Velocity` from a value in km/s.
    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Velocity` from a value in solar radii per day.
    pub fn from_solar_radii_per_day(value: f64) -> Self {
        Self(value * SOLAR_RADII_PER_DAY_TO_KM_S)
    }

    /// Returns the velocity in km/s.
    pub fn to_km_per_sec(&self) -> f64 {
        self.0
    }

    /// Returns the velocity in solar radii per day.
    pub fn to_solar_radii_per_day(&self) -> f64 {
        self.0 / SOLAR_RADII_PER_DAY_TO_KM_S
    }

    /// Returns v/c, the velocity as a fraction of the speed of light.
    ///
    /// Used by the Doppler boosting factor (1 − k·v/c).
    pub fn beta(&self) -> f64 {
        self.0 / SPEED_OF_LIGHT_KM_S
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}

impl Neg for Velocity {
    type Output = Velocity;

    fn neg(self) -> Velocity {
        Velocity(-self.0)
    }
}
