mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Point2;
    use std::f64::consts::FRAC_PI_2;

    use geometry::Ellipse;

    use crate::limb::LimbDarkening;
    use crate::params::Spot;
    use crate::spot_eclipse::spot_eclipsed_fraction;
    use crate::spots::{project_spot, spot_direction, spot_modulation, SpotVisibility};

    fn spot(lat_deg: f64, lon_deg: f64, radius_deg: f64, factor: f64) -> Spot {
        Spot::from_degrees(lat_deg, lon_deg, radius_deg, factor)
    }

    #[test]
    fn sub_observer_spot_faces_the_disc_centre() {
        // Edge-on orbit, spot at lat 0, lon 0, phase 0: beta = pi/2
        let (_, beta) = spot_direction(&spot(0.0, 0.0, 5.0, 0.0), 0.0, FRAC_PI_2);
        assert_relative_eq!(beta, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn far_side_spot_is_hidden() {
        let state = spot_modulation(
            &spot(0.0, 180.0, 5.0, 0.0),
            &LimbDarkening::Linear(0.0),
            0.0,
            FRAC_PI_2,
        );
        assert_eq!(state.visibility, SpotVisibility::Hidden);
        assert_relative_eq!(state.modulation, 1.0);
    }

    #[test]
    fn rotation_carries_the_spot_around() {
        // Half a rotation moves the sub-observer spot to the far side
        let state = spot_modulation(
            &spot(0.0, 0.0, 5.0, 0.0),
            &LimbDarkening::Linear(0.0),
            std::f64::consts::PI,
            FRAC_PI_2,
        );
        assert_eq!(state.visibility, SpotVisibility::Hidden);
    }

    #[test]
    fn dark_spot_dip_matches_projected_area() {
        // Uniform disc, black spot at the sub-observer point: the dip is
        // the projected spot area over pi (linear-spot regime)
        let gamma = 5.0_f64.to_radians();
        let state = spot_modulation(
            &spot(0.0, 0.0, 5.0, 0.0),
            &LimbDarkening::Linear(0.0),
            0.0,
            FRAC_PI_2,
        );
        assert_eq!(state.visibility, SpotVisibility::Full);
        let expected_dip = gamma.sin() * gamma.sin();
        assert_relative_eq!(1.0 - state.modulation, expected_dip, max_relative = 1e-6);
    }

    #[test]
    fn bright_spot_raises_the_flux() {
        let state = spot_modulation(
            &spot(0.0, 0.0, 5.0, 2.0),
            &LimbDarkening::Linear(0.0),
            0.0,
            FRAC_PI_2,
        );
        assert!(state.modulation > 1.0);
    }

    #[test]
    fn limb_spot_loses_less_flux_than_central() {
        let limb = LimbDarkening::Linear(0.0);
        let central = spot_modulation(&spot(0.0, 0.0, 10.0, 0.0), &limb, 0.0, FRAC_PI_2);
        let near_limb = spot_modulation(&spot(0.0, 85.0, 10.0, 0.0), &limb, 0.0, FRAC_PI_2);

        assert!(near_limb.modulation > central.modulation);
        assert!(near_limb.modulation < 1.0);
    }

    #[test]
    fn limb_straddling_visibility_tag() {
        let state = spot_modulation(
            &spot(0.0, 90.0, 8.0, 0.0),
            &LimbDarkening::Linear(0.0),
            0.0,
            FRAC_PI_2,
        );
        assert_eq!(state.visibility, SpotVisibility::OnLimb);
        assert_abs_diff_eq!(state.beta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn projected_outline_shrinks_radially_toward_limb() {
        let gamma = 0.1;
        let central = project_spot(0.0, FRAC_PI_2, gamma);
        assert_relative_eq!(central.semi_major, gamma.sin(), epsilon = 1e-12);
        assert_relative_eq!(central.semi_minor, gamma.sin(), epsilon = 1e-12);

        let oblique = project_spot(0.0, 0.5, gamma);
        assert_relative_eq!(oblique.semi_major, gamma.sin(), epsilon = 1e-12);
        assert!(oblique.semi_minor < central.semi_minor);
        // Centre distance from the disc centre is cos(gamma)·cos(beta)
        assert_relative_eq!(
            oblique.center.coords.norm(),
            gamma.cos() * 0.5_f64.cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn fully_covered_spot_fraction_is_one() {
        let companion = Ellipse::circle(10.0, Point2::origin());
        let frac = spot_eclipsed_fraction(0.3, FRAC_PI_2, 0.1, &companion);
        assert_relative_eq!(frac, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn distant_companion_fraction_is_zero() {
        let companion = Ellipse::circle(0.5, Point2::new(50.0, 0.0));
        let frac = spot_eclipsed_fraction(0.3, FRAC_PI_2, 0.1, &companion);
        assert_eq!(frac, 0.0);
    }

    #[test]
    fn hidden_spot_follows_its_limb_point() {
        // Companion parked over the limb point nearest the hidden spot
        let companion = Ellipse::circle(0.3, Point2::new(1.0, 0.0));
        let covered = spot_eclipsed_fraction(0.0, -0.5, 0.1, &companion);
        assert_eq!(covered, 1.0);

        let clear = spot_eclipsed_fraction(std::f64::consts::PI, -0.5, 0.1, &companion);
        assert_eq!(clear, 0.0);
    }

    #[test]
    fn near_limb_interpolation_stays_bounded() {
        let companion = Ellipse::circle(0.4, Point2::new(0.9, 0.0));
        for beta in [-0.009, -0.003, 0.0, 0.004, 0.009] {
            let frac = spot_eclipsed_fraction(0.0, beta, 0.05, &companion);
            assert!((0.0..=1.0).contains(&frac), "beta={beta} frac={frac}");
        }
    }

    #[test]
    fn partial_cover_is_strictly_between() {
        // Companion edge slicing through a central spot
        let gamma = 0.2_f64;
        let companion = Ellipse::circle(0.5, Point2::new(0.5, 0.0));
        let frac = spot_eclipsed_fraction(0.0, FRAC_PI_2, gamma, &companion);
        assert!(frac > 0.0 && frac < 1.0, "frac={frac}");
    }
}
