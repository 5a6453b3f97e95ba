use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An angular quantity using f64 precision.
///
/// Angles are stored in radians. Public binary-star parameters arrive in
/// degrees (inclination, spot coordinates, misalignment angles), so the
/// degree constructors are the usual entry point at the API boundary.
///
/// # Examples
///
/// ```rust
/// use units::Angle;
///
/// let incl = Angle::from_degrees(90.0);
/// assert!((incl.sin() - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Angle(f64); // Base unit: radians

impl Angle {
    /// Creates a zero angle.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Angle` from a value in radians.
    pub fn from_radians(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Angle` from a value in degrees.
    pub fn from_degrees(value: f64) -> Self {
        Self(value.to_radians())
    }

    /// Returns the angle in radians.
    pub fn to_radians(&self) -> f64 {
        self.0
    }

    /// Returns the angle in degrees.
    pub fn to_degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Normalizes the angle to the range [0, 2π).
    pub fn normalized(&self) -> Self {
        let mut a = self.0 % TAU;
        if a < 0.0 {
            a += TAU;
        }
        Self(a)
    }

    /// Sine of the angle.
    pub fn sin(&self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle.
    pub fn cos(&self) -> f64 {
        self.0.cos()
    }

    /// Tangent of the angle.
    pub fn tan(&self) -> f64 {
        self.0.tan()
    }

    /// Simultaneous sine and cosine.
    pub fn sin_cos(&self) -> (f64, f64) {
        self.0.sin_cos()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}
