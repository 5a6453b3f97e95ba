//! Orthographic projection of a triaxial ellipsoid onto the sky plane.

use nalgebra::{Matrix2, Matrix3, Point2, Vector3};

use crate::ellipse::Ellipse;

/// Relative axis difference below which the ellipsoid is treated as a
/// sphere and the projection short-circuited to a circle. The general path
/// is numerically degenerate for exactly equal axes.
const SPHERE_EPS: f64 = 1e-12;

/// Projects a triaxial ellipsoid onto the sky plane.
///
/// The ellipsoid body frame has its first axis `a` along the line of
/// centres, second axis `b` perpendicular in the orbital plane and third
/// axis `c` along the orbit normal. `phase` is the angle of the line of
/// centres from the sky x-axis measured in the orbital plane, and `incl`
/// the orbital inclination (π/2 = edge-on).
///
/// The silhouette is obtained from the dual quadric: rotating
/// `diag(a², b², c²)` into the sky frame and dropping the line-of-sight
/// row and column leaves the 2×2 dual of the projected ellipse, whose
/// eigenvalues are the squared semi-axes.
///
/// The returned ellipse is centred at the origin; the caller translates it
/// to the star's apparent position.
pub fn project_ellipsoid(semi_axes: (f64, f64, f64), phase: f64, incl: f64) -> Ellipse {
    let (a, b, c) = semi_axes;

    let scale = a.abs().max(b.abs()).max(c.abs());
    if (a - b).abs() <= SPHERE_EPS * scale && (b - c).abs() <= SPHERE_EPS * scale {
        return Ellipse::circle(a, Point2::origin());
    }

    let (sp, cp) = phase.sin_cos();
    let (si, ci) = incl.sin_cos();

    // Body -> orbital plane (rotation about the orbit normal)
    let rz = Matrix3::new(cp, -sp, 0.0, sp, cp, 0.0, 0.0, 0.0, 1.0);
    // Orbital plane -> sky (tilt about the sky x-axis; third row is the
    // line-of-sight coordinate w)
    let ri = Matrix3::new(1.0, 0.0, 0.0, 0.0, ci, -si, 0.0, si, ci);
    let rot = ri * rz;

    let dual = rot * Matrix3::from_diagonal(&Vector3::new(a * a, b * b, c * c)) * rot.transpose();
    let shadow = Matrix2::new(dual[(0, 0)], dual[(0, 1)], dual[(1, 0)], dual[(1, 1)]);

    let eigen = shadow.symmetric_eigen();
    let (major_idx, minor_idx) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };

    let semi_major = eigen.eigenvalues[major_idx].max(0.0).sqrt();
    let semi_minor = eigen.eigenvalues[minor_idx].max(0.0).sqrt();
    let axis = eigen.eigenvectors.column(major_idx);
    let rotation = axis[1].atan2(axis[0]);

    Ellipse::new(semi_major, semi_minor, Point2::origin(), rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn sphere_projects_to_circle() {
        let e = project_ellipsoid((0.1, 0.1, 0.1), 1.3, 1.2);
        assert_relative_eq!(e.semi_major, 0.1, epsilon = 1e-14);
        assert_relative_eq!(e.semi_minor, 0.1, epsilon = 1e-14);
    }

    #[test]
    fn edge_on_conjunction_shows_a_and_c() {
        // Edge-on orbit with the long axis pointing along the sky x-axis:
        // the silhouette spans a horizontally and c vertically.
        let e = project_ellipsoid((0.12, 0.10, 0.09), 0.0, FRAC_PI_2);
        assert_relative_eq!(e.semi_major, 0.12, epsilon = 1e-12);
        assert_relative_eq!(e.semi_minor, 0.09, epsilon = 1e-12);
        assert_relative_eq!(e.rotation.sin().abs(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn edge_on_quadrature_shows_b_and_c() {
        // Line of centres along the line of sight: we see the b-c cross
        // section.
        let e = project_ellipsoid((0.12, 0.10, 0.09), FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(e.semi_major, 0.10, epsilon = 1e-12);
        assert_relative_eq!(e.semi_minor, 0.09, epsilon = 1e-12);
    }

    #[test]
    fn face_on_shows_a_and_b() {
        let e = project_ellipsoid((0.12, 0.10, 0.09), 0.0, 0.0);
        assert_relative_eq!(e.semi_major, 0.12, epsilon = 1e-12);
        assert_relative_eq!(e.semi_minor, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn projection_area_never_exceeds_largest_cross_section() {
        let e = project_ellipsoid((0.12, 0.10, 0.09), 0.7, 1.1);
        let max_area = std::f64::consts::PI * 0.12 * 0.10;
        assert!(e.area <= max_area + 1e-12);
        assert!(e.area > 0.0);
    }
}
