//! Ellipse representation carrying both geometric and implicit conic forms.

use nalgebra::{Matrix2, Point2, Vector2};
use std::f64::consts::PI;

/// An ellipse in the sky plane.
///
/// Carries the geometric parameterization (semi-axes, centre, rotation) and
/// the implicit conic coefficients of `Ax² + Bxy + Cy² + Dx + Ey + F = 0`,
/// normalized so the form is negative inside the ellipse and −1 at the
/// centre of an axis-aligned unit circle.
///
/// Invariant: the two representations agree; every mutator regenerates the
/// conic from the geometry. `area > 0` iff both semi-axes are positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Semi-major axis a_p
    pub semi_major: f64,
    /// Semi-minor axis b_p
    pub semi_minor: f64,
    /// Centre in sky coordinates
    pub center: Point2<f64>,
    /// Rotation of the major axis from the x-axis (radians)
    pub rotation: f64,
    /// Area π·a_p·b_p
    pub area: f64,
    /// Conic x² coefficient
    pub qa: f64,
    /// Conic xy coefficient
    pub qb: f64,
    /// Conic y² coefficient
    pub qc: f64,
    /// Conic x coefficient
    pub qd: f64,
    /// Conic y coefficient
    pub qe: f64,
    /// Conic constant
    pub qf: f64,
}

impl Ellipse {
    /// Creates an ellipse from semi-axes, centre and rotation.
    ///
    /// # Arguments
    /// * `semi_major` - semi-axis along the rotated x-direction
    /// * `semi_minor` - semi-axis along the rotated y-direction
    /// * `center` - centre in sky coordinates
    /// * `rotation` - angle of the major axis from the x-axis (radians)
    pub fn new(semi_major: f64, semi_minor: f64, center: Point2<f64>, rotation: f64) -> Self {
        let mut e = Self {
            semi_major,
            semi_minor,
            center,
            rotation,
            area: PI * semi_major * semi_minor,
            qa: 0.0,
            qb: 0.0,
            qc: 0.0,
            qd: 0.0,
            qe: 0.0,
            qf: 0.0,
        };
        e.update_conic();
        e
    }

    /// Creates a circle of the given radius.
    pub fn circle(radius: f64, center: Point2<f64>) -> Self {
        Self::new(radius, radius, center, 0.0)
    }

    /// Regenerates the implicit conic coefficients from the geometric form.
    fn update_conic(&mut self) {
        let (s, c) = self.rotation.sin_cos();
        let ia2 = 1.0 / (self.semi_major * self.semi_major);
        let ib2 = 1.0 / (self.semi_minor * self.semi_minor);
        let xc = self.center.x;
        let yc = self.center.y;

        self.qa = c * c * ia2 + s * s * ib2;
        self.qb = 2.0 * c * s * (ia2 - ib2);
        self.qc = s * s * ia2 + c * c * ib2;
        self.qd = -(2.0 * self.qa * xc + self.qb * yc);
        self.qe = -(self.qb * xc + 2.0 * self.qc * yc);
        self.qf = self.qa * xc * xc + self.qb * xc * yc + self.qc * yc * yc - 1.0;
        self.area = PI * self.semi_major * self.semi_minor;
    }

    /// Evaluates the implicit conic form at a point.
    ///
    /// Negative inside, zero on the boundary, positive outside.
    pub fn eval(&self, p: Point2<f64>) -> f64 {
        self.qa * p.x * p.x
            + self.qb * p.x * p.y
            + self.qc * p.y * p.y
            + self.qd * p.x
            + self.qe * p.y
            + self.qf
    }

    /// Gradient of the implicit form at a point.
    pub fn gradient(&self, p: Point2<f64>) -> Vector2<f64> {
        Vector2::new(
            2.0 * self.qa * p.x + self.qb * p.y + self.qd,
            self.qb * p.x + 2.0 * self.qc * p.y + self.qe,
        )
    }

    /// Tests whether a point lies strictly inside the ellipse.
    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.eval(p) < 0.0
    }

    /// Returns a copy translated by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut e = *self;
        e.center = Point2::new(self.center.x + dx, self.center.y + dy);
        e.update_conic();
        e
    }

    /// Returns a copy with the centre moved to (x, y).
    pub fn centered_at(&self, x: f64, y: f64) -> Self {
        let mut e = *self;
        e.center = Point2::new(x, y);
        e.update_conic();
        e
    }

    /// Applies the affine map `p ↦ linear·p + translation`.
    ///
    /// The image of an ellipse under an invertible affine map is an ellipse.
    /// The principal axes of the image are recovered from the two mapped
    /// conjugate semi-diameters by singular value decomposition, and the
    /// conic is regenerated from the new geometry.
    pub fn transformed(&self, linear: &Matrix2<f64>, translation: &Vector2<f64>) -> Self {
        let (s, c) = self.rotation.sin_cos();
        let u = linear * Vector2::new(self.semi_major * c, self.semi_major * s);
        let v = linear * Vector2::new(-self.semi_minor * s, self.semi_minor * c);

        let m = Matrix2::from_columns(&[u, v]);
        let svd = m.svd(true, false);
        let axes = svd.singular_values;
        let basis = svd.u.expect("2x2 SVD with compute_u always yields U");

        let rotation = basis[(1, 0)].atan2(basis[(0, 0)]);
        let center = Point2::from(linear * self.center.coords + translation);

        Self::new(axes[0], axes[1], center, rotation)
    }

    /// Parameter values where the line `p(t) = origin + t·dir` crosses the
    /// ellipse boundary, or `None` when the line misses it.
    ///
    /// The two values are sorted ascending; a tangent line yields a
    /// repeated value.
    pub fn line_intersections(&self, origin: Point2<f64>, dir: Vector2<f64>) -> Option<(f64, f64)> {
        let alpha = self.qa * dir.x * dir.x + self.qb * dir.x * dir.y + self.qc * dir.y * dir.y;
        let beta = 2.0 * self.qa * origin.x * dir.x
            + self.qb * (origin.x * dir.y + origin.y * dir.x)
            + 2.0 * self.qc * origin.y * dir.y
            + self.qd * dir.x
            + self.qe * dir.y;
        let gamma = self.eval(origin);

        let disc = beta * beta - 4.0 * alpha * gamma;
        if disc < 0.0 || alpha == 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        // Citardauq form keeps precision when beta dominates
        let q = -0.5 * (beta + beta.signum() * sq);
        let (t1, t2) = if q == 0.0 {
            (0.0, 0.0)
        } else {
            (q / alpha, gamma / q)
        };
        Some(if t1 <= t2 { (t1, t2) } else { (t2, t1) })
    }

    /// Point on the boundary at eccentric parameter `t`.
    ///
    /// `t` is the angle in the scaled principal frame, so `t = 0` is the
    /// end of the major axis and the full boundary is swept over [0, 2π).
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        let (st, ct) = t.sin_cos();
        let (s, c) = self.rotation.sin_cos();
        let x = self.semi_major * ct;
        let y = self.semi_minor * st;
        Point2::new(
            self.center.x + c * x - s * y,
            self.center.y + s * x + c * y,
        )
    }

    /// Eccentric parameter of a boundary (or near-boundary) point.
    pub fn parameter_of(&self, p: Point2<f64>) -> f64 {
        let (s, c) = self.rotation.sin_cos();
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let x = (c * dx + s * dy) / self.semi_major;
        let y = (-s * dx + c * dy) / self.semi_minor;
        y.atan2(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn conic_vanishes_on_boundary() {
        let e = Ellipse::new(2.0, 1.0, Point2::new(0.3, -0.7), 0.4);
        for k in 0..12 {
            let t = k as f64 * PI / 6.0;
            let p = e.point_at(t);
            assert_relative_eq!(e.eval(p), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn conic_sign_convention() {
        let e = Ellipse::new(1.5, 0.5, Point2::new(1.0, 2.0), 0.9);
        assert!(e.eval(e.center) < 0.0);
        assert!(e.eval(Point2::new(10.0, 10.0)) > 0.0);
    }
}
