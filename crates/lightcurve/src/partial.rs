//! Partial and double-partial eclipse integrators.
//!
//! Both work in a chord frame: g runs along a chord joining two
//! intersection points, f perpendicular to it, origin at the chord
//! midpoint. In that frame each ellipse boundary is a quadratic in g at
//! fixed f, so the curvilinear regions become `[f-range] × [g_lo(f),
//! g_hi(f)]` domains for the 2-D quadrature, and the brightness kernel
//! sees the original sky coordinates through an explicit region
//! transform.
//!
//! With two intersections the eclipsed region is the lens between the two
//! arcs; with four, the companion covers a central band of the host and
//! the two *uneclipsed* caps (one per chord) are integrated instead, each
//! as the host slice beyond its chord minus the companion slice beyond
//! the same chord.
//!
//! The returned [`QuadOutcome`] carries ∫B and ∫1 over the same nodes;
//! callers rescale the mean brightness by the analytic region area so the
//! leading quadrature error cancels.

use nalgebra::{Matrix2, Point2, Vector2};

use geometry::{sort_by_centroid_angle, Ellipse};

use crate::brightness::{BrightnessParams, RegionTransform};
use crate::error::NumericError;
use crate::quadrature::{gauss2d, QuadOutcome};

/// Which side of a two-intersection eclipse to integrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The lens covered by the companion
    Eclipsed,
    /// The host disc minus the lens
    Uneclipsed,
}

/// Chord-frame view of the host/companion pair.
struct ChordFrame {
    /// Host ellipse in chord coordinates
    host_cf: Ellipse,
    /// Companion ellipse in chord coordinates
    other_cf: Ellipse,
    /// Map from chord coordinates to kernel coordinates (sky position
    /// relative to the host centre)
    transform: RegionTransform,
    /// f-axis crossings of the host boundary
    host_roots: (f64, f64),
    /// f-axis crossings of the companion boundary
    other_roots: (f64, f64),
    /// Half-length of the chord
    half_chord: f64,
    /// Chord midpoint in sky coordinates
    mid: Point2<f64>,
    /// Unit vector perpendicular to the chord (the f-axis)
    uf: Vector2<f64>,
}

impl ChordFrame {
    /// Builds the chord frame for intersection points p1, p2. `None` when
    /// the chord degenerates or either boundary misses the f-axis (the
    /// chord midpoint lies inside both ellipses for genuine intersection
    /// chords, so both conics cross it twice).
    fn build(host: &Ellipse, other: &Ellipse, p1: Point2<f64>, p2: Point2<f64>) -> Option<Self> {
        let chord = p2 - p1;
        let half_chord = 0.5 * chord.norm();
        if half_chord == 0.0 {
            return None;
        }
        let ug = chord / (2.0 * half_chord);
        let uf = Vector2::new(-ug.y, ug.x);
        let mid = Point2::from(0.5 * (p1.coords + p2.coords));

        // Sky -> chord frame
        let linear = Matrix2::new(uf.x, uf.y, ug.x, ug.y);
        let translation = -(linear * mid.coords);
        let host_cf = host.transformed(&linear, &translation);
        let other_cf = other.transformed(&linear, &translation);

        // Chord frame -> kernel frame (sky relative to the host centre)
        let back = Matrix2::new(uf.x, ug.x, uf.y, ug.y);
        let transform = RegionTransform {
            linear: back,
            translation: mid - host.center,
        };

        let host_roots = axis_crossings(&host_cf)?;
        let other_roots = axis_crossings(&other_cf)?;

        Some(Self {
            host_cf,
            other_cf,
            transform,
            host_roots,
            other_roots,
            half_chord,
            mid,
            uf,
        })
    }

    /// f-coordinate (perpendicular to the chord) of a sky point.
    fn f_of(&self, p: Point2<f64>) -> f64 {
        self.uf.dot(&(p - self.mid))
    }

    /// g-limit of an ellipse boundary at abscissa f; `upper` selects the
    /// branch. Solves the chord-frame conic as a quadratic in g.
    fn g_limit(ellipse: &Ellipse, f: f64, upper: bool) -> f64 {
        let a = ellipse.qc;
        let b = ellipse.qb * f + ellipse.qe;
        let c = ellipse.qa * f * f + ellipse.qd * f + ellipse.qf;
        let disc = (b * b - 4.0 * a * c).max(0.0);
        let sq = disc.sqrt();
        if upper {
            (-b + sq) / (2.0 * a)
        } else {
            (-b - sq) / (2.0 * a)
        }
    }
}

/// f-axis crossings of a chord-frame ellipse (roots of the conic at
/// g = 0).
fn axis_crossings(ellipse: &Ellipse) -> Option<(f64, f64)> {
    let a = ellipse.qa;
    let b = ellipse.qd;
    let c = ellipse.qf;
    let disc = b * b - 4.0 * a * c;
    if disc <= 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    Some(((-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)))
}

/// Splits crossings into (interior to `partner`, the other one); `None`
/// when neither crossing lies inside the partner.
fn interior_split(roots: (f64, f64), partner: &Ellipse) -> Option<(f64, f64)> {
    let e1 = partner.eval(Point2::new(roots.0, 0.0));
    let e2 = partner.eval(Point2::new(roots.1, 0.0));
    if e1 <= e2 {
        (e1 < 0.0).then_some((roots.0, roots.1))
    } else {
        (e2 < 0.0).then_some((roots.1, roots.0))
    }
}

/// The crossing on the given side of the chord (matching the sign of
/// `side`).
fn crossing_on_side(roots: (f64, f64), side: f64) -> Option<f64> {
    if roots.0 * side > 0.0 {
        Some(roots.0)
    } else if roots.1 * side > 0.0 {
        Some(roots.1)
    } else {
        None
    }
}

/// Integrates the host's brightness over the eclipsed lens or the
/// uneclipsed remainder of its disc, for a two-intersection eclipse.
///
/// `p1`, `p2` are the intersection points in sky coordinates. The
/// quadrature grid shrinks with the chord length (never below `n_y_min`
/// nodes) so small lenses are not oversampled.
#[allow(clippy::too_many_arguments)]
pub fn partial(
    host: &Ellipse,
    other: &Ellipse,
    p1: Point2<f64>,
    p2: Point2<f64>,
    region: Region,
    bright: &BrightnessParams,
    n: usize,
    n_y_min: usize,
    n_y_max: usize,
) -> Result<QuadOutcome, NumericError> {
    let frame =
        ChordFrame::build(host, other, p1, p2).ok_or(NumericError::IntersectionFailed)?;

    let (f_host, f_host_far) =
        interior_split(frame.host_roots, &frame.other_cf).ok_or(NumericError::IntersectionFailed)?;
    let (f_other, _) =
        interior_split(frame.other_roots, &frame.host_cf).ok_or(NumericError::IntersectionFailed)?;

    // A transversal lens chord separates the two interior crossings
    if f_host * f_other >= 0.0 {
        return Err(NumericError::IntersectionFailed);
    }

    let mut kernel = bright.clone();
    kernel.region_transform = Some(frame.transform);
    let f = |x: f64, y: f64| kernel.evaluate(x, y);

    let n_x = scaled_nodes(n, frame.half_chord / host.semi_major, n_y_min);
    let host_cf = frame.host_cf;
    let other_cf = frame.other_cf;

    let mut total = QuadOutcome::zero();
    match region {
        Region::Eclipsed => {
            // Host cap beyond the chord on its interior side, then the
            // companion cap on the opposite side; together the lens
            total.accumulate(gauss2d(
                n_x,
                &f,
                0.0,
                f_host,
                |x| ChordFrame::g_limit(&host_cf, x, false),
                |x| ChordFrame::g_limit(&host_cf, x, true),
                n_y_min,
                n_y_max,
            ));
            total.accumulate(gauss2d(
                n_x,
                &f,
                0.0,
                f_other,
                |x| ChordFrame::g_limit(&other_cf, x, false),
                |x| ChordFrame::g_limit(&other_cf, x, true),
                n_y_min,
                n_y_max,
            ));
        }
        Region::Uneclipsed => {
            // Full host slice clear of the companion
            total.accumulate(gauss2d(
                n,
                &f,
                f_host_far,
                f_other,
                |x| ChordFrame::g_limit(&host_cf, x, false),
                |x| ChordFrame::g_limit(&host_cf, x, true),
                n_y_min,
                n_y_max,
            ));
            // Two crescent strips between the companion's arc and the
            // host's, on the companion side of the chord
            total.accumulate(gauss2d(
                n_x,
                &f,
                f_other,
                0.0,
                |x| ChordFrame::g_limit(&host_cf, x, false),
                |x| ChordFrame::g_limit(&other_cf, x, false),
                n_y_min,
                n_y_max,
            ));
            total.accumulate(gauss2d(
                n_x,
                &f,
                f_other,
                0.0,
                |x| ChordFrame::g_limit(&other_cf, x, true),
                |x| ChordFrame::g_limit(&host_cf, x, true),
                n_y_min,
                n_y_max,
            ));
        }
    }
    Ok(total)
}

/// Integrates the host's brightness over the two uneclipsed caps of a
/// four-intersection eclipse.
///
/// The four points, sorted cyclically about their centroid, are paired
/// into the two chords bounding the caps. For each candidate chord the
/// cap lies on the side away from the other chord; the chord is accepted
/// when, on that side, the host boundary reaches beyond the companion's
/// (the probe of which boundary is hit first). Each cap is the host slice
/// beyond the chord minus the companion slice beyond the same chord.
pub fn double_partial(
    host: &Ellipse,
    other: &Ellipse,
    points: &[Point2<f64>],
    bright: &BrightnessParams,
    n: usize,
    n_y_min: usize,
    n_y_max: usize,
) -> Result<QuadOutcome, NumericError> {
    if points.len() != 4 {
        return Err(NumericError::IntersectionFailed);
    }
    let sorted = sort_by_centroid_angle(points);

    let pairings = [[(0, 1), (2, 3)], [(1, 2), (3, 0)]];
    'pairing: for pairing in &pairings {
        let mut total = QuadOutcome::zero();

        for &(i, j) in pairing {
            let frame = match ChordFrame::build(host, other, sorted[i], sorted[j]) {
                Some(frame) => frame,
                None => continue 'pairing,
            };

            // The cap sits on the side of this chord away from the other
            // chord's midpoint
            let (oi, oj) = if (i, j) == pairing[0] {
                pairing[1]
            } else {
                pairing[0]
            };
            let other_mid = Point2::from(0.5 * (sorted[oi].coords + sorted[oj].coords));
            let side = -frame.f_of(other_mid);
            if side == 0.0 {
                continue 'pairing;
            }

            let f_host_cap = match crossing_on_side(frame.host_roots, side) {
                Some(f) => f,
                None => continue 'pairing,
            };
            let f_other_cap = match crossing_on_side(frame.other_roots, side) {
                Some(f) => f,
                None => continue 'pairing,
            };
            // Valid cap: the host boundary lies beyond the companion's
            if f_host_cap.abs() <= f_other_cap.abs() {
                continue 'pairing;
            }

            let mut kernel = bright.clone();
            kernel.region_transform = Some(frame.transform);
            let f = |x: f64, y: f64| kernel.evaluate(x, y);

            let n_x = scaled_nodes(n, frame.half_chord / host.semi_major, n_y_min);
            let host_cf = frame.host_cf;
            let other_cf = frame.other_cf;

            let q_host = gauss2d(
                n_x,
                &f,
                0.0,
                f_host_cap,
                |x| ChordFrame::g_limit(&host_cf, x, false),
                |x| ChordFrame::g_limit(&host_cf, x, true),
                n_y_min,
                n_y_max,
            );
            let q_comp = gauss2d(
                n_x,
                &f,
                0.0,
                f_other_cap,
                |x| ChordFrame::g_limit(&other_cf, x, false),
                |x| ChordFrame::g_limit(&other_cf, x, true),
                n_y_min,
                n_y_max,
            );
            total.accumulate(QuadOutcome {
                flux: q_host.flux - q_comp.flux,
                area: q_host.area - q_comp.area,
            });
        }

        if total.area > 0.0 {
            return Ok(total);
        }
    }
    Err(NumericError::IntersectionFailed)
}

/// Node count proportional to the linear size of the region, floored at
/// the minimum and capped at the full grid.
fn scaled_nodes(n: usize, ratio: f64, n_min: usize) -> usize {
    ((n as f64 * ratio.abs().min(1.0)).ceil() as usize).clamp(n_min.min(n), n)
}
