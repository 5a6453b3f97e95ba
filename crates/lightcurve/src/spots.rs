//! Circular-spot flux modulation on the spherical-star approximation.
//!
//! Each spot is a circular region of modified surface brightness. Its
//! projected outline is an ellipse (foreshortened radially by the
//! inclination of the spot normal to the line of sight), so the visible
//! spot area comes straight from the ellipse-overlap primitive with the
//! stellar disc outline. The flux deficit follows the Eker (1994)
//! treatment: the limb-darkening law is reduced to an effective quadratic
//! and evaluated at the spot, and the modulation is normalized by the
//! analytic disc flux.
//!
//! # References
//! - Eker (1994) ApJ 420, 373 - light curves of spotted stars

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use geometry::{ell_ell_overlap, Ellipse};

use crate::limb::LimbDarkening;
use crate::params::Spot;

/// Visibility state of a spot at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotVisibility {
    /// Entirely on the far hemisphere
    Hidden,
    /// Straddling the limb
    OnLimb,
    /// Entirely on the visible hemisphere
    Full,
}

/// Modulation of one spot at one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotState {
    /// Multiplicative flux factor df; 1 when the spot has no effect
    pub modulation: f64,
    /// Visibility tag
    pub visibility: SpotVisibility,
    /// Apparent latitude of the spot centre above the limb plane
    /// (radians; negative on the far side)
    pub beta: f64,
    /// Position angle of the spot centre on the disc (radians)
    pub alpha: f64,
}

/// Sky-plane outline of a spot on the unit-radius disc.
///
/// For a spot centre at angle ψ from the line of sight the outline is an
/// ellipse at distance cos γ·sin ψ from the disc centre along position
/// angle α, with tangential semi-axis sin γ and radial semi-axis
/// sin γ·|cos ψ|.
pub fn project_spot(alpha: f64, beta: f64, gamma: f64) -> Ellipse {
    let cos_psi = beta.sin(); // psi = pi/2 - beta
    let sin_psi = beta.cos();
    let rho = gamma.cos() * sin_psi;
    let (sa, ca) = alpha.sin_cos();

    Ellipse::new(
        gamma.sin(),
        gamma.sin() * cos_psi.abs().max(1e-6),
        Point2::new(rho * ca, rho * sa),
        alpha + std::f64::consts::FRAC_PI_2,
    )
}

/// Direction cosines of the spot centre in the observer frame.
///
/// `rot_phase` is the rotational phase of the star (radians); a spot at
/// longitude 0 faces the observer at phase 0 for an edge-on orbit. Returns
/// (α, β): the position angle on the disc and the apparent latitude above
/// the limb plane.
pub fn spot_direction(spot: &Spot, rot_phase: f64, incl: f64) -> (f64, f64) {
    let lon = spot.longitude + rot_phase;
    let (sb, cb) = spot.latitude.sin_cos();
    let (sl, cl) = lon.sin_cos();
    let (si, ci) = incl.sin_cos();

    // Orbital-frame direction of the spot centre; the star faces the
    // observer along (0, sin i, cos i)
    let x = cb * sl;
    let y = cb * cl;
    let z = sb;

    // Line-of-sight component and sky components
    let w = y * si + z * ci;
    let u = x;
    let v = y * ci - z * si;

    let alpha = v.atan2(u);
    let beta = w.clamp(-1.0, 1.0).asin();
    (alpha, beta)
}

/// Flux modulation factor and visibility of one spot.
///
/// The deficit is `(1 − fs)·I(μ_eff)·A_vis / F_disc`, with `A_vis` the
/// projected visible spot area from the overlap of the spot outline with
/// the unit disc, `I` the effective-quadratic limb darkening at the spot
/// and `F_disc` the analytic disc flux. A brightness factor above one
/// turns the deficit into an excess.
pub fn spot_modulation(
    spot: &Spot,
    limb: &LimbDarkening,
    rot_phase: f64,
    incl: f64,
) -> SpotState {
    let (alpha, beta) = spot_direction(spot, rot_phase, incl);
    let gamma = spot.radius;

    let visibility = if beta <= -gamma {
        SpotVisibility::Hidden
    } else if beta >= gamma {
        SpotVisibility::Full
    } else {
        SpotVisibility::OnLimb
    };

    if visibility == SpotVisibility::Hidden {
        return SpotState {
            modulation: 1.0,
            visibility,
            beta,
            alpha,
        };
    }

    // Visible projected spot area on the unit disc
    let outline = project_spot(alpha, beta, gamma);
    let disc = Ellipse::circle(1.0, Point2::origin());
    let visible_area = match visibility {
        SpotVisibility::Full => outline.area,
        _ => ell_ell_overlap(&outline, &disc).0,
    };

    // Effective quadratic law at the spot centre's mu (edge-averaged for
    // limb spots)
    let (a, b) = limb.effective_quadratic();
    let mu0 = beta.sin().max(0.0);
    let mu_edge = (beta + gamma).min(std::f64::consts::FRAC_PI_2).sin();
    let mu_eff = 0.5 * (mu0 + mu_edge.max(0.0));
    let d = 1.0 - mu_eff;
    let intensity = 1.0 - a * d - b * d * d;

    let deficit = (1.0 - spot.factor) * intensity * visible_area / limb.disc_flux();

    SpotState {
        modulation: 1.0 - deficit,
        visibility,
        beta,
        alpha,
    }
}
