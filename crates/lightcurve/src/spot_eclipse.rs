//! Eclipsed fraction of a spot.
//!
//! Determines how much of a spot's visible flux modulation is hidden by
//! the eclipsing companion, so the orchestrator does not double-count the
//! spot deficit inside the eclipsed region. Works on the unit-disc frame
//! of the host star: the caller translates the companion's projected
//! ellipse so the host centre is the origin and rescales by the host's
//! local radius at the spot (the "line of sight parallel to the line of
//! centres" approximation, adequate near i = 90°).
//!
//! The spot-limb geometry is unstable as the spot centre approaches the
//! limb plane, so for |β| below a small threshold the fraction is
//! evaluated at ±β_lim and interpolated linearly to the real β.

use nalgebra::Point2;

use geometry::{ell_ell_overlap, Ellipse};

use crate::spots::project_spot;

/// Apparent-latitude threshold (radians) below which the two-run
/// interpolation replaces a direct evaluation.
pub const BETA_LIM: f64 = 1e-2;

/// Fraction of the spot's visible projected area covered by the
/// companion.
///
/// `alpha` and `beta` are the spot centre's position angle and apparent
/// latitude from the spot kernel; `gamma` its angular radius; `companion`
/// the eclipsing ellipse in the host's unit-disc frame. The result is in
/// [0, 1].
pub fn spot_eclipsed_fraction(alpha: f64, beta: f64, gamma: f64, companion: &Ellipse) -> f64 {
    if beta.abs() >= BETA_LIM {
        return eclipsed_at(alpha, beta, gamma, companion);
    }

    // Near the limb plane: run on both sides and interpolate
    let hi = eclipsed_at(alpha, BETA_LIM, gamma, companion);
    let lo = eclipsed_at(alpha, -BETA_LIM, gamma, companion);

    let wt = if gamma <= BETA_LIM && beta <= -gamma {
        (beta + gamma) / (BETA_LIM + gamma)
    } else {
        0.5 + beta / (2.0 * BETA_LIM)
    };
    let wt = wt.clamp(0.0, 1.0);
    wt * hi + (1.0 - wt) * lo
}

/// Direct evaluation away from the limb plane.
fn eclipsed_at(alpha: f64, beta: f64, gamma: f64, companion: &Ellipse) -> f64 {
    // Entirely on the far hemisphere: the only trace of the spot is at
    // the limb point nearest its centre, covered or not
    if beta <= -gamma {
        let limb_point = Point2::new(alpha.cos(), alpha.sin());
        return if companion.contains(limb_point) {
            1.0
        } else {
            0.0
        };
    }

    let outline = project_spot(alpha, beta, gamma);

    // Fully on the visible disc: plain overlap against the companion
    if beta >= gamma {
        let (covered, _) = ell_ell_overlap(&outline, companion);
        return (covered / outline.area).clamp(0.0, 1.0);
    }

    // Straddling the limb: ratio of covered-visible to visible area
    let disc = Ellipse::circle(1.0, Point2::origin());
    let (visible, _) = ell_ell_overlap(&outline, &disc);
    if visible <= 0.0 {
        let limb_point = Point2::new(alpha.cos(), alpha.sin());
        return if companion.contains(limb_point) {
            1.0
        } else {
            0.0
        };
    }
    let (covered, _) = ell_ell_overlap(&outline, companion);
    (covered.min(visible) / visible).clamp(0.0, 1.0)
}
