//! Limb-darkening laws.
//!
//! Specific intensity profiles I(μ) normalized to I(1) = 1, where μ is the
//! cosine of the angle between the local surface normal and the line of
//! sight. Besides the parametric laws a tabulated profile on a uniform
//! μ-grid is supported (μ = 0 in the first element, μ = 1 in the last,
//! linear interpolation between samples).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::InputError;

/// Control-block tag selecting a limb-darkening law.
///
/// The historical convention of encoding a tabulated profile as a negative
/// tag is replaced by the explicit [`LdLaw::MuGrid`] variant; the boundary
/// sentinel is mapped in [`LdLaw::from_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LdLaw {
    /// I(μ) = 1 − u(1−μ)
    Linear,
    /// I(μ) = 1 − a(1−μ) − b(1−μ)²
    Quadratic,
    /// I(μ) = 1 − a(1−μ) − b(1−√μ)
    SquareRoot,
    /// I(μ) = 1 − a(1−μ) − b·μ·ln μ
    Logarithmic,
    /// Claret (2000) four-parameter law
    Claret4,
    /// I(μ) = 1 − c(1−μ^α)
    Power2,
    /// Tabulated intensity on a uniform μ-grid
    MuGrid,
}

/// Boundary sentinel tag selecting tabulated limb darkening.
pub const LD_MUGRID_TAG: i32 = -1;

impl LdLaw {
    /// Maps a control-block integer to a law tag.
    pub fn from_tag(tag: i32) -> Result<Self, InputError> {
        match tag {
            0 => Ok(Self::Linear),
            1 => Ok(Self::Quadratic),
            2 => Ok(Self::SquareRoot),
            3 => Ok(Self::Logarithmic),
            4 => Ok(Self::Claret4),
            5 => Ok(Self::Power2),
            LD_MUGRID_TAG => Ok(Self::MuGrid),
            other => Err(InputError::UnknownLdTag(other)),
        }
    }
}

/// A limb-darkening profile with its coefficients resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LimbDarkening {
    /// Linear law with coefficient u
    Linear(f64),
    /// Quadratic law
    Quadratic(f64, f64),
    /// Square-root law
    SquareRoot(f64, f64),
    /// Logarithmic law
    Logarithmic(f64, f64),
    /// Claret four-parameter law
    Claret4([f64; 4]),
    /// Power-2 law (c, α)
    Power2(f64, f64),
    /// Tabulated specific intensity on a uniform μ-grid
    MuGrid(Vec<f64>),
}

impl LimbDarkening {
    /// Builds a profile from a law tag, the four coefficient slots and the
    /// optional μ-grid.
    pub fn from_law(
        law: LdLaw,
        coeffs: &[f64; 4],
        mugrid: Option<&[f64]>,
        star: u8,
    ) -> Result<Self, InputError> {
        match law {
            LdLaw::Linear => Ok(Self::Linear(coeffs[0])),
            LdLaw::Quadratic => Ok(Self::Quadratic(coeffs[0], coeffs[1])),
            LdLaw::SquareRoot => Ok(Self::SquareRoot(coeffs[0], coeffs[1])),
            LdLaw::Logarithmic => Ok(Self::Logarithmic(coeffs[0], coeffs[1])),
            LdLaw::Claret4 => Ok(Self::Claret4(*coeffs)),
            LdLaw::Power2 => Ok(Self::Power2(coeffs[0], coeffs[1])),
            LdLaw::MuGrid => {
                let grid = mugrid.ok_or(InputError::MissingMuGrid(star))?;
                if grid.len() < 2 {
                    return Err(InputError::MuGridTooShort(grid.len()));
                }
                Ok(Self::MuGrid(grid.to_vec()))
            }
        }
    }

    /// Specific intensity at μ, with μ clipped into [0, 1].
    pub fn intensity(&self, mu: f64) -> f64 {
        let mu = mu.clamp(0.0, 1.0);
        match self {
            Self::Linear(u) => 1.0 - u * (1.0 - mu),
            Self::Quadratic(a, b) => {
                let d = 1.0 - mu;
                1.0 - a * d - b * d * d
            }
            Self::SquareRoot(a, b) => 1.0 - a * (1.0 - mu) - b * (1.0 - mu.sqrt()),
            Self::Logarithmic(a, b) => {
                // μ·ln μ → 0 as μ → 0
                let log_term = if mu > 0.0 { mu * mu.ln() } else { 0.0 };
                1.0 - a * (1.0 - mu) - b * log_term
            }
            Self::Claret4(c) => {
                let mut i = 1.0;
                for (k, &a) in c.iter().enumerate() {
                    let p = 0.5 * (k as f64 + 1.0);
                    i -= a * (1.0 - mu.powf(p));
                }
                i
            }
            Self::Power2(c, alpha) => 1.0 - c * (1.0 - mu.powf(*alpha)),
            Self::MuGrid(grid) => {
                let n = grid.len();
                let x = mu * (n - 1) as f64;
                let idx = (x.floor() as usize).min(n - 2);
                let frac = x - idx as f64;
                grid[idx] * (1.0 - frac) + grid[idx + 1] * frac
            }
        }
    }

    /// Analytic disc-integrated flux of a unit-radius sphere,
    /// ∫ I(μ)·μ dΩ over the visible hemisphere.
    ///
    /// Closed forms per law; trapezoidal quadrature on the grid for the
    /// tabulated profile. Used to normalize spot flux deficits.
    pub fn disc_flux(&self) -> f64 {
        match self {
            Self::Linear(u) => PI * (1.0 - u / 3.0),
            Self::Quadratic(a, b) => PI * (1.0 - a / 3.0 - b / 6.0),
            Self::SquareRoot(a, b) => PI * (1.0 - a / 3.0 - b / 5.0),
            Self::Logarithmic(a, b) => PI * (1.0 - a / 3.0 + 2.0 * b / 9.0),
            Self::Claret4(c) => {
                let mut f = 1.0;
                for (k, &a) in c.iter().enumerate() {
                    let kk = k as f64 + 1.0;
                    f -= a * kk / (kk + 4.0);
                }
                PI * f
            }
            Self::Power2(c, alpha) => PI * (1.0 - c * alpha / (alpha + 2.0)),
            Self::MuGrid(grid) => {
                let n = grid.len();
                let h = 1.0 / (n - 1) as f64;
                let mut sum = 0.0;
                for (k, &i_k) in grid.iter().enumerate() {
                    let mu = k as f64 * h;
                    let w = if k == 0 || k == n - 1 { 0.5 } else { 1.0 };
                    sum += w * i_k * mu;
                }
                2.0 * PI * sum * h
            }
        }
    }

    /// Reduces the law to an effective quadratic by matching intensities
    /// at μ = 0, 0.5 and 1.
    ///
    /// Linear and quadratic laws are returned exactly; the spot modulation
    /// kernel works in the quadratic family.
    pub fn effective_quadratic(&self) -> (f64, f64) {
        match self {
            Self::Linear(u) => (*u, 0.0),
            Self::Quadratic(a, b) => (*a, *b),
            _ => {
                let x = 1.0 - self.intensity(0.0);
                let y = 1.0 - self.intensity(0.5);
                (4.0 * y - x, 2.0 * x - 4.0 * y)
            }
        }
    }
}
