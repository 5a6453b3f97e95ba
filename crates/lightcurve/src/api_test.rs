mod tests {
    use approx::assert_relative_eq;

    use crate::api::{lc, rv};
    use crate::flags::ObsFlags;
    use crate::params::{BinaryParams, Verbosity, BAD_VALUE};

    /// The 39 boundary slots of the default detached binary.
    fn default_pars() -> [f64; 39] {
        let mut pars = [0.0; 39];
        pars[1] = 1.0; // period
        pars[2] = 1.0; // surface brightness ratio
        pars[3] = 0.1; // R1/a
        pars[4] = 0.1; // R2/a
        pars[5] = 90.0; // inclination (degrees)
        pars[10] = 1.0; // mass ratio
        pars[23] = 1.0; // rotation factor 1
        pars[24] = 1.0; // rotation factor 2
        pars[37] = 1.5; // h_f,1
        pars[38] = 1.5; // h_f,2
        pars
    }

    fn default_ints() -> [i32; 10] {
        // grids, spots, ld laws, shapes (spheres), rv flag, exact-grav
        [16, 16, 0, 0, 0, 0, 0, 0, 0, 0]
    }

    #[test]
    fn from_slice_matches_defaults() {
        let parsed = BinaryParams::from_slice(&default_pars()).unwrap();
        assert_eq!(parsed, BinaryParams::defaults());
    }

    #[test]
    fn lc_produces_unity_out_of_eclipse() {
        let rows = lc(
            &[0.25, 0.75],
            &default_pars(),
            &default_ints(),
            &[],
            &[],
            4,
            &[],
            &[],
            Verbosity::Silent,
        );
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_relative_eq!(row[0], 1.0, epsilon = 1e-9);
            let flags = ObsFlags::from_bits(row[5] as u32);
            assert!(!flags.is_eclipse());
        }
    }

    #[test]
    fn lc_flags_the_epoch_eclipse() {
        let rows = lc(
            &[0.0],
            &default_pars(),
            &default_ints(),
            &[],
            &[],
            4,
            &[],
            &[],
            Verbosity::Silent,
        );
        let flags = ObsFlags::from_bits(rows[0][5] as u32);
        assert!(flags.contains(ObsFlags::ECLIPSE));
        assert!(flags.contains(ObsFlags::STAR2_ECLIPSED));
    }

    #[test]
    fn lc_bad_input_fills_sentinels() {
        let mut pars = default_pars();
        pars[3] = 0.9; // above the Roche limit
        let rows = lc(
            &[0.0, 0.1, 0.2],
            &pars,
            &default_ints(),
            &[],
            &[],
            4,
            &[],
            &[],
            Verbosity::Silent,
        );
        for row in rows {
            assert_eq!(row[0], BAD_VALUE);
            assert_eq!(row[3], BAD_VALUE);
            let flags = ObsFlags::from_bits(row[5] as u32);
            assert!(flags.contains(ObsFlags::ERROR));
        }
    }

    #[test]
    fn lc_wrong_array_length_is_an_error_not_a_panic() {
        let rows = lc(
            &[0.0],
            &[1.0; 7],
            &default_ints(),
            &[],
            &[],
            4,
            &[],
            &[],
            Verbosity::Silent,
        );
        assert!(ObsFlags::from_bits(rows[0][5] as u32).contains(ObsFlags::ERROR));
    }

    #[test]
    fn s6_mugrid_matches_linear_law() {
        // Tabulated I(mu) = mu on a uniform 101-point grid against the
        // parametric linear law with u = 1
        let mut linear_pars = default_pars();
        linear_pars[11] = 1.0; // u1
        linear_pars[15] = 1.0; // u2
        let linear = lc(
            &[0.0, 0.02, 0.25, 0.48, 0.5],
            &linear_pars,
            &default_ints(),
            &[],
            &[],
            4,
            &[],
            &[],
            Verbosity::Silent,
        );

        let grid: Vec<f64> = (0..101).map(|k| k as f64 / 100.0).collect();
        let mut tab_ints = default_ints();
        tab_ints[4] = -1; // mu-grid sentinel
        tab_ints[5] = -1;
        let tabulated = lc(
            &[0.0, 0.02, 0.25, 0.48, 0.5],
            &default_pars(),
            &tab_ints,
            &[],
            &[],
            4,
            &grid,
            &grid,
            Verbosity::Silent,
        );

        for (a, b) in linear.iter().zip(&tabulated) {
            assert_relative_eq!(a[0], b[0], epsilon = 1e-5);
            assert_relative_eq!(a[1], b[1], epsilon = 1e-5);
            assert_relative_eq!(a[2], b[2], epsilon = 1e-5);
        }
    }

    #[test]
    fn spots_are_read_column_major() {
        // One dark spot facing the observer on star 1; 5 rows per column,
        // the fifth ignored
        let spot_cols = [0.0, 0.0, 10.0, 0.0, 99.0];
        let mut pars = default_pars();
        pars[5] = 60.0; // avoid the eclipse at the epoch
        let mut ints = default_ints();
        ints[2] = 1;

        let rows = lc(
            &[0.0],
            &pars,
            &ints,
            &spot_cols,
            &[],
            5,
            &[],
            &[],
            Verbosity::Silent,
        );
        assert!(rows[0][0] < 1.0 - 1e-4, "spot should dim the system");

        let mis_sized = lc(
            &[0.0],
            &pars,
            &ints,
            &spot_cols[..3],
            &[],
            5,
            &[],
            &[],
            Verbosity::Silent,
        );
        assert!(ObsFlags::from_bits(mis_sized[0][5] as u32).contains(ObsFlags::ERROR));
    }

    #[test]
    fn rv_amplitude_follows_the_orbit() {
        let mut pars = default_pars();
        pars[7] = 10.0; // semi-major axis in solar radii
        let rows = rv(&[0.0, 0.25, 0.5, 0.75], &pars, Verbosity::Silent);
        assert_eq!(rows.len(), 4);

        // Conjunctions: velocities vanish up to the light-time shift
        // (applied unconditionally on this path)
        assert_relative_eq!(rows[0][0], 0.0, epsilon = 0.5);
        assert_relative_eq!(rows[2][1], 0.0, epsilon = 0.5);

        // Quadratures: K = 2*pi*a*f_k/P in km/s, opposite signs
        let k_expected = std::f64::consts::TAU * 10.0 * 0.5 * 695_700.0 / 86_400.0 / 1.0;
        assert_relative_eq!(rows[1][0].abs(), k_expected, max_relative = 1e-4);
        assert!(rows[1][0] * rows[1][1] < 0.0);
    }

    #[test]
    fn rv_bad_input_fills_sentinels() {
        let rows = rv(&[0.0, 1.0], &[0.0; 5], Verbosity::Silent);
        for row in rows {
            assert_eq!(row, [BAD_VALUE, BAD_VALUE]);
        }
    }
}
