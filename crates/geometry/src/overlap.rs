//! Signed overlap area of two ellipses.
//!
//! The lens (two crossings), double-lens (four crossings) and containment
//! cases are handled uniformly: the overlap boundary is decomposed into
//! elliptic arcs, each contributing a segment area on top of the polygon
//! spanned by the intersection points.

use std::f64::consts::TAU;

use nalgebra::Point2;

use crate::ellipse::Ellipse;
use crate::flags::IntersectFlags;
use crate::intersect::ell_ell_intersect;

/// Relative tolerance below which an overlap is reported as no overlap.
///
/// Grazing contacts produce tiny lens areas that are numerically
/// indistinguishable from tangency; treating them as no overlap keeps the
/// eclipse classifier stable.
pub const OVERLAP_ATOL: f64 = 1e-5;

/// Area of the region common to both ellipses, with topology flags.
///
/// The area is non-negative; `(0.0, flags)` with
/// [`IntersectFlags::NO_OVERLAP`] set means disjoint interiors or an
/// overlap below [`OVERLAP_ATOL`] relative to the smaller ellipse.
pub fn ell_ell_overlap(e1: &Ellipse, e2: &Ellipse) -> (f64, IntersectFlags) {
    let isect = ell_ell_intersect(e1, e2);
    let mut flags = isect.flags;

    if flags.contains(IntersectFlags::ERROR) {
        return (0.0, flags);
    }
    if flags.contains(IntersectFlags::IDENTICAL) {
        return (e1.area, flags);
    }
    if flags.contains(IntersectFlags::ONE_INSIDE_TWO) {
        return (e1.area, flags);
    }
    if flags.contains(IntersectFlags::TWO_INSIDE_ONE) {
        return (e2.area, flags);
    }
    if flags.contains(IntersectFlags::NO_OVERLAP) {
        return (0.0, flags);
    }

    let area = match isect.count {
        2 => lens_area(e1, e2, isect.points[0], isect.points[1], &mut flags),
        4 => double_lens_area(e1, e2, &isect.points, &mut flags),
        _ => 0.0,
    };

    if area < OVERLAP_ATOL * e1.area.min(e2.area) {
        flags.insert(IntersectFlags::NO_OVERLAP);
        return (0.0, flags);
    }
    (area, flags)
}

/// Lens between two transversal crossings: one segment from each ellipse,
/// joined along the common chord.
fn lens_area(
    e1: &Ellipse,
    e2: &Ellipse,
    p1: Point2<f64>,
    p2: Point2<f64>,
    flags: &mut IntersectFlags,
) -> f64 {
    segment_toward(e1, e2, p1, p2, flags) + segment_toward(e2, e1, p1, p2, flags)
}

/// Segment of `e` between the chord `p1p2` and whichever of its two arcs
/// lies inside `other`.
fn segment_toward(
    e: &Ellipse,
    other: &Ellipse,
    p1: Point2<f64>,
    p2: Point2<f64>,
    flags: &mut IntersectFlags,
) -> f64 {
    let t1 = e.parameter_of(p1);
    let t2 = e.parameter_of(p2);
    let fwd = (t2 - t1).rem_euclid(TAU);
    let rev = TAU - fwd;

    if other.contains(e.point_at(t1 + 0.5 * fwd)) {
        segment_area(e, fwd)
    } else if other.contains(e.point_at(t2 + 0.5 * rev)) {
        segment_area(e, rev)
    } else {
        // Both arc midpoints classified outside: a grazing configuration
        flags.insert(IntersectFlags::WARN_INACCURATE);
        segment_area(e, fwd.min(rev))
    }
}

/// Area between an arc spanning `delta` of eccentric parameter and its
/// chord: (Δ − sin Δ)/2 on the unit circle, scaled by a·b.
fn segment_area(e: &Ellipse, delta: f64) -> f64 {
    0.5 * (delta - delta.sin()) * e.semi_major * e.semi_minor
}

/// Overlap bounded by four transversal crossings: the polygon of the
/// crossing points plus, per edge, the segment of whichever ellipse's
/// adjacent arc lies inside the other.
fn double_lens_area(
    e1: &Ellipse,
    e2: &Ellipse,
    points: &[Point2<f64>],
    flags: &mut IntersectFlags,
) -> f64 {
    let sorted = sort_by_centroid_angle(points);
    let mut area = shoelace(&sorted);

    for i in 0..4 {
        let p = sorted[i];
        let q = sorted[(i + 1) % 4];
        let others = [sorted[(i + 2) % 4], sorted[(i + 3) % 4]];

        let (d1, m1) = adjacent_arc(e1, p, q, &others);
        let (d2, m2) = adjacent_arc(e2, p, q, &others);
        let inside1 = e2.contains(m1);
        let inside2 = e1.contains(m2);

        area += match (inside1, inside2) {
            (true, false) => segment_area(e1, d1),
            (false, true) => segment_area(e2, d2),
            _ => {
                flags.insert(IntersectFlags::WARN_INACCURATE);
                segment_area(e1, d1).min(segment_area(e2, d2))
            }
        };
    }
    area
}

/// Arc of `e` from `p` to `q` that does not pass through either of the
/// other two intersection points; returns (parameter span, arc midpoint).
fn adjacent_arc(
    e: &Ellipse,
    p: Point2<f64>,
    q: Point2<f64>,
    others: &[Point2<f64>; 2],
) -> (f64, Point2<f64>) {
    let tp = e.parameter_of(p);
    let tq = e.parameter_of(q);
    let fwd = (tq - tp).rem_euclid(TAU);

    let blocked = others.iter().any(|&o| {
        let to = (e.parameter_of(o) - tp).rem_euclid(TAU);
        to > 1e-12 && to < fwd - 1e-12
    });

    if blocked {
        let rev = TAU - fwd;
        (rev, e.point_at(tq + 0.5 * rev))
    } else {
        (fwd, e.point_at(tp + 0.5 * fwd))
    }
}

/// Counter-clockwise angular order about the centroid of the points.
///
/// Exposed for the double-partial eclipse integrator, which pairs the four
/// intersection points into chords from this cyclic order.
pub fn sort_by_centroid_angle(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let cx = points.iter().map(|p| p.x).sum::<f64>() / points.len() as f64;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let ta = (a.y - cy).atan2(a.x - cx);
        let tb = (b.y - cy).atan2(b.x - cx);
        ta.partial_cmp(&tb).expect("finite angles")
    });
    sorted
}

/// Unsigned polygon area of points in cyclic order.
fn shoelace(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice.abs()
}
