//! Real intersection points of two ellipses.
//!
//! The two conics are reduced to a quartic in x by eliminating y with the
//! resultant of the two quadratics-in-y, the quartic is solved by
//! [`crate::quartic::real_roots`], and every surviving candidate is
//! polished with a 2-D Newton iteration on the original conic pair.
//! Tangential contacts (parallel conic gradients) are discarded, so the
//! transversal count is always 0, 2 or 4.

use log::debug;
use nalgebra::Point2;

use crate::ellipse::Ellipse;
use crate::flags::IntersectFlags;
use crate::quartic::real_roots;

/// Maximum Newton iterations when polishing a candidate root.
const POLISH_ITERS: usize = 12;

/// Residual (relative to the conic's term scale) below which a polished
/// point is accepted without comment.
const RESID_GOOD: f64 = 1e-9;

/// Residual ceiling; between [`RESID_GOOD`] and this the point is kept
/// with a warning, above it polishing has failed.
const RESID_POOR: f64 = 1e-5;

/// Result of [`ell_ell_intersect`].
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Number of transversal intersection points (0, 2 or 4).
    pub count: usize,
    /// The intersection points, `count` of them.
    pub points: Vec<Point2<f64>>,
    /// Topology and quality flags.
    pub flags: IntersectFlags,
}

/// Finds the real transversal intersections of two ellipses.
///
/// Containment of one ellipse in the other, coincident ellipses and
/// disjoint ellipses are reported through the flag bits; a failed root
/// polish sets [`IntersectFlags::ERROR`] without panicking so the caller
/// can fail a single observation and continue.
pub fn ell_ell_intersect(e1: &Ellipse, e2: &Ellipse) -> Intersection {
    let mut flags = IntersectFlags::empty();

    if conics_identical(e1, e2) {
        flags.insert(IntersectFlags::IDENTICAL);
        return Intersection {
            count: 0,
            points: Vec::new(),
            flags,
        };
    }

    let quartic = resultant_in_x(e1, e2);
    let xs = real_roots(&quartic);

    let scale = e1.semi_major.max(e2.semi_major);
    let mut points: Vec<Point2<f64>> = Vec::with_capacity(4);
    let mut any_poor = false;
    let mut any_failed = false;

    for &x in &xs {
        for candidate in candidate_ys(e1, e2, x) {
            match polish(e1, e2, candidate) {
                PolishOutcome::Good(p) => merge_point(&mut points, p, scale),
                PolishOutcome::Poor(p) => {
                    any_poor = true;
                    merge_point(&mut points, p, scale);
                }
                PolishOutcome::Failed => any_failed = true,
            }
        }
    }

    // Tangential contacts do not change the overlap topology
    points.retain(|&p| is_transversal(e1, e2, p));

    // An odd survivor count is a polish artifact; drop the most nearly
    // tangent point to restore a consistent crossing parity
    while points.len() % 2 == 1 {
        let (idx, _) = points
            .iter()
            .enumerate()
            .map(|(i, &p)| (i, gradient_cross(e1, e2, p)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).expect("finite gradients"))
            .expect("non-empty point list");
        points.remove(idx);
        any_poor = true;
    }
    points.truncate(4);

    if any_poor {
        flags.insert(IntersectFlags::WARN_INACCURATE);
    }
    if any_failed && points.is_empty() {
        debug!("ellipse intersection root polish failed with no usable points");
        flags.insert(IntersectFlags::ERROR);
    }

    match points.len() {
        4 => flags.insert(IntersectFlags::FOUR_INTERSECTS),
        2 => flags.insert(IntersectFlags::TWO_INTERSECTS),
        _ if flags.contains(IntersectFlags::ERROR) => {}
        _ => {
            // No boundary crossings: one ellipse contains the other, or
            // the interiors are disjoint
            if e2.contains(e1.point_at(0.0)) {
                flags.insert(IntersectFlags::ONE_INSIDE_TWO);
            } else if e1.contains(e2.point_at(0.0)) {
                flags.insert(IntersectFlags::TWO_INSIDE_ONE);
            } else {
                flags.insert(IntersectFlags::NO_OVERLAP);
            }
        }
    }

    Intersection {
        count: points.len(),
        points,
        flags,
    }
}

/// Coefficient-level coincidence test.
///
/// The conic normalization is fixed by the geometry (the form is −1 at the
/// centre of a unit circle), so coincident ellipses produce identical
/// coefficient vectors up to rounding.
fn conics_identical(e1: &Ellipse, e2: &Ellipse) -> bool {
    let c1 = [e1.qa, e1.qb, e1.qc, e1.qd, e1.qe, e1.qf];
    let c2 = [e2.qa, e2.qb, e2.qc, e2.qd, e2.qe, e2.qf];
    let norm = c1
        .iter()
        .chain(c2.iter())
        .fold(0.0_f64, |m, c| m.max(c.abs()));
    c1.iter()
        .zip(c2.iter())
        .all(|(a, b)| (a - b).abs() <= 1e-9 * norm)
}

/// Quartic in x from eliminating y between the two conics.
///
/// Writing each conic as `a·y² + b(x)·y + c(x)`, the resultant of the two
/// quadratics in y is `(ac' − a'c)² − (ab' − a'b)(bc' − b'c)`; its real
/// roots are the x-coordinates of the common points.
fn resultant_in_x(e1: &Ellipse, e2: &Ellipse) -> [f64; 5] {
    let (a1, b1, c1, d1, f1, g1) = (e1.qa, e1.qb, e1.qc, e1.qd, e1.qe, e1.qf);
    let (a2, b2, c2, d2, f2, g2) = (e2.qa, e2.qb, e2.qc, e2.qd, e2.qe, e2.qf);

    // u(x) = a·c'(x) − a'·c(x), degree 2
    let u0 = c1 * g2 - c2 * g1;
    let u1 = c1 * d2 - c2 * d1;
    let u2 = c1 * a2 - c2 * a1;

    // v(x) = a·b'(x) − a'·b(x), degree 1
    let v0 = c1 * f2 - c2 * f1;
    let v1 = c1 * b2 - c2 * b1;

    // w(x) = b(x)·c'(x) − b'(x)·c(x), degree 3
    let w0 = f1 * g2 - f2 * g1;
    let w1 = f1 * d2 + b1 * g2 - (f2 * d1 + b2 * g1);
    let w2 = f1 * a2 + b1 * d2 - (f2 * a1 + b2 * d1);
    let w3 = b1 * a2 - b2 * a1;

    [
        u0 * u0 - v0 * w0,
        2.0 * u0 * u1 - (v0 * w1 + v1 * w0),
        u1 * u1 + 2.0 * u0 * u2 - (v0 * w2 + v1 * w1),
        2.0 * u1 * u2 - (v0 * w3 + v1 * w2),
        u2 * u2 - v1 * w3,
    ]
}

/// Candidate y-coordinates for a quartic root x.
///
/// Generically y is the shared root `−u(x)/v(x)` of the two quadratics in
/// y. When v(x) vanishes (both ellipses symmetric about the x-axis at this
/// abscissa) both roots of the first conic are candidates and the second
/// conic arbitrates.
fn candidate_ys(e1: &Ellipse, e2: &Ellipse, x: f64) -> Vec<Point2<f64>> {
    let v = (e1.qc * e2.qe - e2.qc * e1.qe) + (e1.qc * e2.qb - e2.qc * e1.qb) * x;
    let u = (e1.qc * e2.qf - e2.qc * e1.qf)
        + (e1.qc * e2.qd - e2.qc * e1.qd) * x
        + (e1.qc * e2.qa - e2.qc * e1.qa) * x * x;

    let vscale = (e1.qc.abs() + e2.qc.abs()) * (1.0 + x.abs());
    if v.abs() > 1e-9 * vscale {
        return vec![Point2::new(x, -u / v)];
    }

    // Degenerate pencil: solve conic 1 for y and keep roots conic 2 accepts
    let a = e1.qc;
    let b = e1.qb * x + e1.qe;
    let c = e1.qa * x * x + e1.qd * x + e1.qf;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    let sq = disc.sqrt();
    [(-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)]
        .iter()
        .map(|&y| Point2::new(x, y))
        .filter(|&p| {
            let s = term_scale(e2, p);
            e2.eval(p).abs() < 1e-4 * s
        })
        .collect()
}

enum PolishOutcome {
    Good(Point2<f64>),
    Poor(Point2<f64>),
    Failed,
}

/// Newton polish of a candidate point on the conic pair.
fn polish(e1: &Ellipse, e2: &Ellipse, start: Point2<f64>) -> PolishOutcome {
    let mut p = start;

    for _ in 0..POLISH_ITERS {
        let f1 = e1.eval(p);
        let f2 = e2.eval(p);
        let g1 = e1.gradient(p);
        let g2 = e2.gradient(p);

        let det = g1.x * g2.y - g1.y * g2.x;
        if det.abs() < 1e-300 {
            break;
        }
        let dx = (f1 * g2.y - f2 * g1.y) / det;
        let dy = (f2 * g1.x - f1 * g2.x) / det;
        p = Point2::new(p.x - dx, p.y - dy);

        if dx.hypot(dy) < 1e-14 * (1.0 + p.coords.norm()) {
            break;
        }
    }

    let r1 = e1.eval(p).abs() / term_scale(e1, p);
    let r2 = e2.eval(p).abs() / term_scale(e2, p);
    let resid = r1.max(r2);

    if resid <= RESID_GOOD {
        PolishOutcome::Good(p)
    } else if resid <= RESID_POOR {
        PolishOutcome::Poor(p)
    } else {
        PolishOutcome::Failed
    }
}

/// Natural cancellation scale of the conic terms at a point.
fn term_scale(e: &Ellipse, p: Point2<f64>) -> f64 {
    e.qa.abs() * p.x * p.x
        + e.qb.abs() * (p.x * p.y).abs()
        + e.qc.abs() * p.y * p.y
        + e.qd.abs() * p.x.abs()
        + e.qe.abs() * p.y.abs()
        + e.qf.abs()
}

/// Normalized cross product of the two conic gradients at a point.
fn gradient_cross(e1: &Ellipse, e2: &Ellipse, p: Point2<f64>) -> f64 {
    let g1 = e1.gradient(p);
    let g2 = e2.gradient(p);
    let n = g1.norm() * g2.norm();
    if n == 0.0 {
        return 0.0;
    }
    (g1.x * g2.y - g1.y * g2.x).abs() / n
}

/// True when the boundaries genuinely cross (gradients not parallel).
fn is_transversal(e1: &Ellipse, e2: &Ellipse, p: Point2<f64>) -> bool {
    gradient_cross(e1, e2, p) > 1e-7
}

/// Adds a point unless an equal point (within tolerance) is present.
fn merge_point(points: &mut Vec<Point2<f64>>, p: Point2<f64>, scale: f64) {
    let dup = points
        .iter()
        .any(|q| (p - q).norm() < 1e-7 * scale.max(1e-300));
    if !dup {
        points.push(p);
    }
}
