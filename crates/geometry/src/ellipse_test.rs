mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Point2, Vector2};
    use std::f64::consts::{FRAC_PI_3, PI};

    use crate::ellipse::Ellipse;

    #[test]
    fn area_follows_semi_axes() {
        let e = Ellipse::new(2.0, 0.5, Point2::origin(), 0.0);
        assert_relative_eq!(e.area, PI, epsilon = 1e-14);
    }

    #[test]
    fn translation_keeps_forms_coherent() {
        let e = Ellipse::new(1.5, 0.75, Point2::new(0.2, -0.4), 0.6).translated(1.0, 2.0);

        assert_relative_eq!(e.center.x, 1.2, epsilon = 1e-14);
        assert_relative_eq!(e.center.y, 1.6, epsilon = 1e-14);
        for k in 0..8 {
            let p = e.point_at(k as f64 * PI / 4.0);
            assert_relative_eq!(e.eval(p), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn centered_at_moves_centre() {
        let e = Ellipse::new(1.0, 0.5, Point2::new(5.0, 5.0), 0.0).centered_at(-1.0, 3.0);
        assert_relative_eq!(e.center.x, -1.0);
        assert_relative_eq!(e.center.y, 3.0);
        assert!(e.contains(Point2::new(-1.0, 3.0)));
    }

    #[test]
    fn rotation_transform_rotates_major_axis() {
        let e = Ellipse::new(2.0, 1.0, Point2::origin(), 0.0);
        let (s, c) = FRAC_PI_3.sin_cos();
        let rot = Matrix2::new(c, -s, s, c);
        let rotated = e.transformed(&rot, &Vector2::zeros());

        assert_relative_eq!(rotated.semi_major, 2.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.semi_minor, 1.0, epsilon = 1e-12);
        // Rotation is defined modulo π for an ellipse
        let diff = (rotated.rotation - FRAC_PI_3).rem_euclid(PI);
        assert!(diff < 1e-10 || diff > PI - 1e-10);
    }

    #[test]
    fn affine_maps_boundary_to_boundary() {
        let e = Ellipse::new(1.2, 0.4, Point2::new(0.3, 0.1), 0.8);
        let linear = Matrix2::new(1.5, 0.4, -0.2, 0.9);
        let shift = Vector2::new(0.7, -1.1);
        let image = e.transformed(&linear, &shift);

        for k in 0..12 {
            let p = e.point_at(k as f64 * PI / 6.0);
            let mapped = Point2::from(linear * p.coords + shift);
            assert_relative_eq!(image.eval(mapped), 0.0, epsilon = 1e-10);
        }
        // Area scales by |det|
        let det = (linear.determinant()).abs();
        assert_relative_eq!(image.area, det * e.area, epsilon = 1e-10);
    }

    #[test]
    fn line_hits_circle_at_two_parameters() {
        let e = Ellipse::circle(1.0, Point2::origin());
        let (t1, t2) = e
            .line_intersections(Point2::new(-2.0, 0.0), Vector2::new(1.0, 0.0))
            .expect("line through the centre must hit");
        assert_relative_eq!(t1, 1.0, epsilon = 1e-12);
        assert_relative_eq!(t2, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn line_missing_returns_none() {
        let e = Ellipse::circle(1.0, Point2::origin());
        assert!(e
            .line_intersections(Point2::new(0.0, 2.0), Vector2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn contains_classifies_points() {
        let e = Ellipse::new(2.0, 1.0, Point2::origin(), 0.0);
        assert!(e.contains(Point2::new(1.9, 0.0)));
        assert!(!e.contains(Point2::new(2.1, 0.0)));
        assert!(e.contains(Point2::new(0.0, 0.9)));
        assert!(!e.contains(Point2::new(0.0, 1.1)));
    }

    #[test]
    fn parameter_round_trip() {
        let e = Ellipse::new(1.7, 0.6, Point2::new(-0.5, 0.25), 1.1);
        for k in 0..10 {
            let t = k as f64 * PI / 5.0;
            let p = e.point_at(t);
            let back = e.parameter_of(p).rem_euclid(2.0 * PI);
            assert_relative_eq!(back, t.rem_euclid(2.0 * PI), epsilon = 1e-12);
        }
    }
}
