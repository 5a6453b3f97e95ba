mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Point2, Vector2};
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use crate::ellipse::Ellipse;
    use crate::flags::IntersectFlags;
    use crate::intersect::ell_ell_intersect;

    #[test]
    fn crossing_circles_give_two_points() {
        let e1 = Ellipse::circle(1.0, Point2::origin());
        let e2 = Ellipse::circle(1.0, Point2::new(1.0, 0.0));

        let isect = ell_ell_intersect(&e1, &e2);
        assert_eq!(isect.count, 2);
        assert!(isect.flags.contains(IntersectFlags::TWO_INTERSECTS));

        let root3 = 3.0_f64.sqrt() / 2.0;
        let mut ys: Vec<f64> = isect.points.iter().map(|p| p.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(isect.points[0].x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(ys[0], -root3, epsilon = 1e-9);
        assert_relative_eq!(ys[1], root3, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_circles_report_no_overlap() {
        let e1 = Ellipse::circle(1.0, Point2::origin());
        let e2 = Ellipse::circle(1.0, Point2::new(3.0, 0.0));

        let isect = ell_ell_intersect(&e1, &e2);
        assert_eq!(isect.count, 0);
        assert!(isect.flags.contains(IntersectFlags::NO_OVERLAP));
    }

    #[test]
    fn contained_circle_sets_containment_flag() {
        let small = Ellipse::circle(0.2, Point2::new(0.1, 0.0));
        let big = Ellipse::circle(1.0, Point2::origin());

        let isect = ell_ell_intersect(&small, &big);
        assert_eq!(isect.count, 0);
        assert!(isect.flags.contains(IntersectFlags::ONE_INSIDE_TWO));

        let swapped = ell_ell_intersect(&big, &small);
        assert!(swapped.flags.contains(IntersectFlags::TWO_INSIDE_ONE));
    }

    #[test]
    fn identical_ellipses_detected() {
        let e = Ellipse::new(1.3, 0.6, Point2::new(0.4, -0.2), 0.7);
        let isect = ell_ell_intersect(&e, &e.clone());
        assert!(isect.flags.contains(IntersectFlags::IDENTICAL));
        assert_eq!(isect.count, 0);
    }

    #[test]
    fn orthogonal_ellipses_give_four_points() {
        // x²/4 + 4y² = 1 against 4x² + y²/4 = 1 crosses at y = ±x,
        // x² = 4/17
        let e1 = Ellipse::new(2.0, 0.5, Point2::origin(), 0.0);
        let e2 = Ellipse::new(0.5, 2.0, Point2::origin(), 0.0);

        let isect = ell_ell_intersect(&e1, &e2);
        assert_eq!(isect.count, 4);
        assert!(isect.flags.contains(IntersectFlags::FOUR_INTERSECTS));

        let expected = (4.0_f64 / 17.0).sqrt();
        for p in &isect.points {
            assert_relative_eq!(p.x.abs(), expected, epsilon = 1e-8);
            assert_relative_eq!(p.y.abs(), expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn circle_in_wide_ellipse_gives_four_points() {
        // Unit circle against x²/4 + 4y² = 1: crossings at x = ±2y,
        // y² = 1/5
        let e1 = Ellipse::circle(1.0, Point2::origin());
        let e2 = Ellipse::new(2.0, 0.5, Point2::origin(), 0.0);

        let isect = ell_ell_intersect(&e1, &e2);
        assert_eq!(isect.count, 4);

        let y = (1.0_f64 / 5.0).sqrt();
        for p in &isect.points {
            assert_relative_eq!(p.y.abs(), y, epsilon = 1e-8);
            assert_relative_eq!(p.x.abs(), 2.0 * y, epsilon = 1e-8);
        }
    }

    /// Random affine image of a known configuration keeps its crossing
    /// count: build circle pairs with an analytically known relation, then
    /// push both through the same random invertible map.
    #[test]
    fn random_pairs_match_analytic_count() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let margin = 5e-3;
        let mut checked = 0;

        for _ in 0..500 {
            let r1: f64 = rng.random_range(0.3..1.5);
            let r2: f64 = rng.random_range(0.3..1.5);
            let d: f64 = rng.random_range(0.0..(r1 + r2) * 1.4);

            let expected = if d > r1 + r2 + margin {
                0
            } else if d < (r1 - r2).abs() - margin {
                0 // containment, no boundary crossing
            } else if d > (r1 - r2).abs() + margin && d < r1 + r2 - margin {
                2
            } else {
                continue; // too close to tangency for an exact count
            };

            let c1 = Ellipse::circle(r1, Point2::origin());
            let c2 = Ellipse::circle(r2, Point2::new(d, 0.0));

            // Random invertible affine map, applied to both
            let linear = loop {
                let m: Matrix2<f64> = Matrix2::new(
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                );
                if m.determinant().abs() > 0.2 {
                    break m;
                }
            };
            let shift = Vector2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));

            let e1 = c1.transformed(&linear, &shift);
            let e2 = c2.transformed(&linear, &shift);

            let isect = ell_ell_intersect(&e1, &e2);
            assert_eq!(
                isect.count, expected,
                "r1={r1} r2={r2} d={d} linear={linear:?}"
            );
            checked += 1;
        }
        assert!(checked > 300, "only {checked} non-degenerate cases drawn");
    }

    /// Four-crossing configurations survive random affine maps too.
    #[test]
    fn random_four_point_pairs_keep_count() {
        let mut rng = ChaChaRng::seed_from_u64(7);

        for _ in 0..200 {
            let e1 = Ellipse::circle(1.0, Point2::origin());
            let e2 = Ellipse::new(2.0, 0.5, Point2::origin(), 0.0);

            let linear = loop {
                let m: Matrix2<f64> = Matrix2::new(
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                );
                if m.determinant().abs() > 0.2 {
                    break m;
                }
            };
            let shift = Vector2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));

            let isect = ell_ell_intersect(
                &e1.transformed(&linear, &shift),
                &e2.transformed(&linear, &shift),
            );
            assert_eq!(isect.count, 4, "linear={linear:?} shift={shift:?}");

            // Every reported point lies on both boundaries
            for p in &isect.points {
                let i1 = e1.transformed(&linear, &shift);
                let i2 = e2.transformed(&linear, &shift);
                assert!(i1.eval(*p).abs() < 1e-6);
                assert!(i2.eval(*p).abs() < 1e-6);
            }
        }
    }
}
