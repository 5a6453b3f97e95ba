mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, TAU};

    use crate::kepler::{
        eccentric_anomaly, eccentric_of_true, mean_anomaly_of, true_anomaly_of, KeplerError,
    };

    #[test]
    fn round_trip_over_eccentricity_grid() {
        // mean_of(eccentric_anomaly(M, e), e) = M to 1e-10 across the
        // elliptic range, including close to e = 1
        for i in 0..20 {
            let e = 0.05 * i as f64; // 0.0 .. 0.95
            for j in 0..36 {
                let m = TAU * j as f64 / 36.0;
                let ecc_anom = eccentric_anomaly(m, e).expect("solver converges");
                assert_relative_eq!(
                    mean_anomaly_of(ecc_anom, e),
                    m,
                    epsilon = 1e-10,
                    max_relative = 1e-10
                );
            }
        }
    }

    #[test]
    fn high_eccentricity_near_periastron() {
        // The hard corner: e → 1, M → 0, where naive Newton diverges
        for &e in &[0.95, 0.99, 0.999] {
            for &m in &[1e-6, 1e-3, 0.01, 0.1] {
                let ecc_anom = eccentric_anomaly(m, e).expect("solver converges");
                assert_relative_eq!(mean_anomaly_of(ecc_anom, e), m, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn circular_orbit_is_identity() {
        for j in 0..12 {
            let m = TAU * j as f64 / 12.0;
            let ecc_anom = eccentric_anomaly(m, 0.0).unwrap();
            assert_relative_eq!(ecc_anom, m, epsilon = 1e-13);
        }
    }

    #[test]
    fn mean_anomaly_cycle_is_preserved() {
        let ecc_anom = eccentric_anomaly(3.0 * TAU + 0.5, 0.3).unwrap();
        let m = mean_anomaly_of(ecc_anom, 0.3);
        assert_relative_eq!(m, 3.0 * TAU + 0.5, epsilon = 1e-9);
    }

    #[test]
    fn invalid_eccentricity_is_rejected() {
        assert_eq!(
            eccentric_anomaly(1.0, 1.0),
            Err(KeplerError::InvalidEccentricity(1.0))
        );
        assert!(eccentric_anomaly(1.0, -0.1).is_err());
    }

    #[test]
    fn true_anomaly_round_trip() {
        for i in 0..10 {
            let e = 0.09 * i as f64;
            for j in 1..24 {
                let ecc_anom = TAU * j as f64 / 24.0;
                let nu = true_anomaly_of(ecc_anom, e);
                let back = eccentric_of_true(nu, e).rem_euclid(TAU);
                assert_relative_eq!(back, ecc_anom.rem_euclid(TAU), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn true_anomaly_quadrants() {
        // At E = π the star is at apastron, ν = π
        let nu = true_anomaly_of(PI, 0.5);
        assert_relative_eq!(nu, PI, epsilon = 1e-12);

        // Before apastron the true anomaly leads the eccentric anomaly
        let nu_early = true_anomaly_of(PI / 3.0, 0.5);
        assert!(nu_early > PI / 3.0);
    }
}
