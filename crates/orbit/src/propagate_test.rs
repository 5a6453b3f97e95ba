mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    use crate::elements::{eccentricity_vector, romer_epoch_delay, Orbit};
    use crate::rv::radial_velocities;

    fn circular_orbit(q: f64, a_solar: f64) -> Orbit {
        Orbit::new(0.0, 1.0, 0.0, FRAC_PI_2, FRAC_PI_2, 0.0, 0.0, q, a_solar)
            .expect("valid elements")
    }

    #[test]
    fn eccentricity_vector_round_trip() {
        let e = 0.3_f64;
        let omega = 1.1_f64;
        let (f_c, f_s) = (e.sqrt() * omega.cos(), e.sqrt() * omega.sin());
        let (e_out, omega_out) = eccentricity_vector(f_c, f_s);
        assert_relative_eq!(e_out, e, epsilon = 1e-14);
        assert_relative_eq!(omega_out, omega, epsilon = 1e-14);
    }

    #[test]
    fn circular_vector_defaults_omega() {
        let (e, omega) = eccentricity_vector(0.0, 0.0);
        assert_eq!(e, 0.0);
        assert_relative_eq!(omega, FRAC_PI_2);
    }

    #[test]
    fn epoch_is_conjunction_with_star1_in_front() {
        let orbit = circular_orbit(0.7, 0.0);
        let state = orbit.sky_state(0.0).expect("propagates");

        // At T0 the stars are aligned on the sky and star 1 is in front
        assert_abs_diff_eq!(state.sky_separation(), 0.0, epsilon = 1e-9);
        assert!(state.star1_in_front());

        // Half a period later the alignment recurs with star 2 in front
        let opposite = orbit.sky_state(0.5).unwrap();
        assert_abs_diff_eq!(opposite.sky_separation(), 0.0, epsilon = 1e-9);
        assert!(!opposite.star1_in_front());
    }

    #[test]
    fn eccentric_epoch_is_still_conjunction() {
        let (e, omega) = (0.4, 0.8);
        let orbit = Orbit::new(2.5, 3.0, e, omega, FRAC_PI_2, 0.0, 0.0, 1.0, 0.0).unwrap();
        let state = orbit.sky_state(2.5).expect("propagates");
        assert_abs_diff_eq!(state.sky_separation(), 0.0, epsilon = 1e-9);
        assert!(state.star1_in_front());
    }

    #[test]
    fn separation_extremes_at_apsides() {
        let orbit = Orbit::new(0.0, 1.0, 0.3, 0.0, FRAC_PI_2, 0.0, 0.0, 1.0, 0.0).unwrap();
        let peri = orbit.phase_state(orbit.t_peri).unwrap();
        assert_relative_eq!(peri.sep, 0.7, epsilon = 1e-12);

        let apo = orbit.phase_state(orbit.t_peri + 0.5).unwrap();
        assert_relative_eq!(apo.sep, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn apsidal_motion_advances_omega() {
        let rate = 0.01; // radians per sidereal period
        let orbit = Orbit::new(0.0, 1.0, 0.2, 0.3, FRAC_PI_2, rate, 0.0, 1.0, 0.0).unwrap();
        let after_ten = orbit.omega_at(10.0 * orbit.period_sid);
        assert_relative_eq!(after_ten, 0.3 + 0.1, epsilon = 1e-10);
        assert!(orbit.period_sid < orbit.period_anom);
    }

    #[test]
    fn light_time_correction_vanishes_for_equal_masses() {
        // q = 1, e = 0: the Romer delay of the epoch is exactly zero
        assert_eq!(romer_epoch_delay(0.01, FRAC_PI_2, 0.0, FRAC_PI_2, 1.0), 0.0);

        let orbit = circular_orbit(1.0, 5.0);
        assert_eq!(orbit.t_zero, 0.0);
    }

    #[test]
    fn light_time_correction_scales_with_mass_asymmetry() {
        let d1 = romer_epoch_delay(0.01, FRAC_PI_2, 0.0, FRAC_PI_2, 0.5);
        let d2 = romer_epoch_delay(0.01, FRAC_PI_2, 0.0, FRAC_PI_2, 0.25);
        assert!(d2 > d1);
        assert!(d1 > 0.0);
    }

    #[test]
    fn retarded_positions_differ_with_light_time() {
        let near = circular_orbit(0.5, 0.0);
        let far = circular_orbit(0.5, 500.0);

        // Away from conjunction the light-time corrected positions of the
        // two configurations disagree
        let s_near = near.sky_state(0.23).unwrap();
        let s_far = far.sky_state(0.23).unwrap();
        let shift = (s_near.pos2[0] - s_far.pos2[0]).abs();
        assert!(shift > 1e-9, "light time moved star 2 by {shift}");
    }

    #[test]
    fn rv_is_zero_at_conjunction_and_antiphased() {
        let orbit = circular_orbit(0.5, 10.0);

        // The unconditional light-time correction leaves a small residual
        // at conjunction
        let (rv1, rv2) = radial_velocities(&orbit, 0.0).unwrap();
        assert_abs_diff_eq!(rv1.to_km_per_sec(), 0.0, epsilon = 0.3);
        assert_abs_diff_eq!(rv2.to_km_per_sec(), 0.0, epsilon = 0.3);

        // At quadrature the stars move oppositely, scaled by mass ratio
        let (rv1, rv2) = radial_velocities(&orbit, 0.25).unwrap();
        assert!(rv1.to_km_per_sec() * rv2.to_km_per_sec() < 0.0);
        assert_relative_eq!(
            rv1.to_km_per_sec().abs() / rv2.to_km_per_sec().abs(),
            0.5,
            max_relative = 1e-6
        );
    }

    #[test]
    fn star2_approaches_after_epoch() {
        // Just after being occulted, star 2 swings toward the observer:
        // negative (approaching) radial velocity
        let orbit = circular_orbit(1.0, 10.0);
        let (_, rv2) = radial_velocities(&orbit, 0.1).unwrap();
        assert!(rv2.to_km_per_sec() < 0.0);
    }

    #[test]
    fn rv_without_semi_major_axis_is_zero() {
        let orbit = circular_orbit(1.0, 0.0);
        let (rv1, rv2) = radial_velocities(&orbit, 0.31).unwrap();
        assert_eq!(rv1.to_km_per_sec(), 0.0);
        assert_eq!(rv2.to_km_per_sec(), 0.0);
    }
}
