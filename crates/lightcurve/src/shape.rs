//! Triaxial-ellipsoid approximation of a tidally and rotationally
//! distorted star.
//!
//! The first-order equilibrium response to the companion's tide and the
//! star's own (possibly asynchronous) rotation deforms the surface into an
//! ellipsoid with axes along the line of centres (a), perpendicular in the
//! orbital plane (b) and along the orbit normal (c), plus a small offset
//! of the centre of figure toward the companion. The response amplitude is
//! a fluid Love number h_f: 1 for the centrally condensed Roche model,
//! 1 + 2k₂ for polytropes and 5/2 for a uniform-density sphere.
//!
//! # References
//! - Chandrasekhar (1933) - polytropic apsidal-motion constants
//! - Kopal (1959) - "Close Binary Systems", first-order tidal theory

use serde::{Deserialize, Serialize};
use units::constants::{APSIDAL_CONSTANT_POLY_1_5, APSIDAL_CONSTANT_POLY_3};

use crate::error::{InputError, NumericError};

/// Relative tolerance on the volume-radius invariant.
const VOLUME_TOL: f64 = 1e-6;

/// Iteration budget of the volume root search.
const VOLUME_ITERS: usize = 40;

/// Shape model of a star, selected per star in the control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeModel {
    /// Undistorted sphere
    Sphere,
    /// Roche response (h_f = 1); the radius parameter is the directed
    /// radius toward the companion
    Roche,
    /// Roche response with the radius parameter as volume radius
    RocheVolume,
    /// User-supplied fluid Love number h_f ∈ [0, 5/2]
    Love,
    /// n = 1.5 polytrope (convective envelope)
    Polytrope1_5,
    /// n = 3 polytrope (radiative envelope)
    Polytrope3,
}

impl ShapeModel {
    /// Maps a control-block integer to a shape model.
    pub fn from_tag(tag: i32) -> Result<Self, InputError> {
        match tag {
            0 => Ok(Self::Sphere),
            1 => Ok(Self::Roche),
            2 => Ok(Self::RocheVolume),
            3 => Ok(Self::Love),
            4 => Ok(Self::Polytrope1_5),
            5 => Ok(Self::Polytrope3),
            other => Err(InputError::UnknownShapeTag(other)),
        }
    }

    /// Fluid Love number of the model; `hf` is consulted only for
    /// [`ShapeModel::Love`].
    pub fn love_number(&self, hf: f64) -> f64 {
        match self {
            Self::Sphere => 0.0,
            Self::Roche | Self::RocheVolume => 1.0,
            Self::Love => hf,
            Self::Polytrope1_5 => 1.0 + 2.0 * APSIDAL_CONSTANT_POLY_1_5,
            Self::Polytrope3 => 1.0 + 2.0 * APSIDAL_CONSTANT_POLY_3,
        }
    }
}

/// The approximating ellipsoid of one star, in units of the semi-major
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarShape {
    /// Semi-axes (a, b, c): line of centres, in-plane perpendicular,
    /// orbit normal
    pub axes: (f64, f64, f64),
    /// Offset of the centre of figure from the mass centre toward the
    /// companion
    pub offset: f64,
}

impl StarShape {
    /// Volume radius (abc)^(1/3).
    pub fn volume_radius(&self) -> f64 {
        let (a, b, c) = self.axes;
        (a * b * c).cbrt()
    }

    /// Directed radius of the surface along a unit direction in the body
    /// frame.
    pub fn directed_radius(&self, dir: (f64, f64, f64)) -> f64 {
        let (a, b, c) = self.axes;
        let q = (dir.0 / a).powi(2) + (dir.1 / b).powi(2) + (dir.2 / c).powi(2);
        1.0 / q.sqrt()
    }
}

/// Builds the ellipsoid for a star.
///
/// # Arguments
/// * `model` - shape model tag
/// * `radius` - fractional radius R/a; volume radius for every model
///   except [`ShapeModel::Roche`], where it is the directed radius toward
///   the companion
/// * `sep` - instantaneous separation in units of the semi-major axis
/// * `rotfac` - rotation rate in units of the synchronous rate
/// * `mass_ratio` - companion mass over this star's mass
/// * `hf` - fluid Love number (Love model only)
///
/// For the volume-radius models the ellipsoid volume matches
/// (4π/3)·radius³ to a relative tolerance of 1e-6, which requires a scalar
/// root search because the distortion itself grows with the base radius.
pub fn star_shape(
    model: ShapeModel,
    radius: f64,
    sep: f64,
    rotfac: f64,
    mass_ratio: f64,
    hf: f64,
) -> Result<StarShape, NumericError> {
    if model == ShapeModel::Sphere {
        return Ok(StarShape {
            axes: (radius, radius, radius),
            offset: 0.0,
        });
    }

    let h = model.love_number(hf);

    if model == ShapeModel::Roche {
        // Directed-radius semantics: pin the a-axis to the given radius
        let scale = solve_scale(radius, |r0| distorted_axes(r0, sep, rotfac, mass_ratio, h).0)?;
        let axes = distorted_axes(scale, sep, rotfac, mass_ratio, h);
        return Ok(StarShape {
            axes,
            offset: centre_offset(scale, sep, mass_ratio, h),
        });
    }

    // Volume-radius semantics: conserve (abc)^(1/3)
    let scale = solve_scale(radius, |r0| {
        let (a, b, c) = distorted_axes(r0, sep, rotfac, mass_ratio, h);
        (a * b * c).cbrt()
    })?;
    let axes = distorted_axes(scale, sep, rotfac, mass_ratio, h);
    Ok(StarShape {
        axes,
        offset: centre_offset(scale, sep, mass_ratio, h),
    })
}

/// First-order ellipsoid axes for base radius `r0`.
///
/// Tidal parameter n = q·r0³/d³ and rotational parameter
/// w = F²(1+q)·r0³/3 (synchronous mean motion as the rate unit) enter the
/// P₂ response as
/// `a = r0(1 + h(n + w/2))`, `b = r0(1 + h(w/2 − n/2))`,
/// `c = r0(1 − h(n/2 + w))`.
fn distorted_axes(r0: f64, sep: f64, rotfac: f64, mass_ratio: f64, h: f64) -> (f64, f64, f64) {
    let r3 = r0 * r0 * r0;
    let n = mass_ratio * r3 / (sep * sep * sep);
    let w = rotfac * rotfac * (1.0 + mass_ratio) * r3 / 3.0;
    (
        r0 * (1.0 + h * (n + 0.5 * w)),
        r0 * (1.0 + h * (0.5 * w - 0.5 * n)),
        r0 * (1.0 - h * (0.5 * n + w)),
    )
}

/// Leading-order offset of the centre of figure toward the companion
/// (octupole tidal response).
fn centre_offset(r0: f64, sep: f64, mass_ratio: f64, h: f64) -> f64 {
    let d4 = sep.powi(4);
    h * mass_ratio * r0.powi(4) / d4
}

/// Finds the base radius whose distorted figure reproduces `target`
/// through `measure`, by secant iteration.
fn solve_scale<F: Fn(f64) -> f64>(target: f64, measure: F) -> Result<f64, NumericError> {
    let mut r_prev = target;
    let mut f_prev = measure(r_prev) - target;
    if f_prev.abs() <= VOLUME_TOL * target {
        return Ok(r_prev);
    }

    // The distortion inflates the measure, so undershooting the base
    // radius gives a usable second point
    let mut r = target * (1.0 - f_prev / target.max(1e-12)).clamp(0.5, 1.5);
    for _ in 0..VOLUME_ITERS {
        let f = measure(r) - target;
        if f.abs() <= VOLUME_TOL * target {
            return Ok(r);
        }
        let denom = f - f_prev;
        if denom == 0.0 {
            break;
        }
        let r_next = r - f * (r - r_prev) / denom;
        r_prev = r;
        f_prev = f;
        r = r_next.clamp(0.1 * target, 2.0 * target);
    }

    Err(NumericError::ShapeNonConvergence { radius: target })
}

/// Distance from the star's centre to the inner Lagrangian point, in units
/// of the separation.
///
/// Solves the collinear equilibrium condition of the (possibly
/// asynchronous) Roche potential by bisection on (0, 1):
/// `−1/x² + q/(1−x)² + F²(1+q)(x − q/(1+q)) = 0`.
/// The fractional radius must stay below this limit (scaled by the
/// periastron separation) for the ellipsoid approximation to be
/// meaningful.
pub fn roche_lobe_l1(mass_ratio: f64, rotfac: f64) -> f64 {
    let q = mass_ratio;
    let f2 = rotfac * rotfac;
    let gradient =
        |x: f64| -1.0 / (x * x) + q / ((1.0 - x) * (1.0 - x)) + f2 * (1.0 + q) * (x - q / (1.0 + q));

    let mut lo = 1e-6;
    let mut hi = 1.0 - 1e-6;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if gradient(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
