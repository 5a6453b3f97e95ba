mod tests {
    use approx::assert_relative_eq;

    use crate::constants::SPEED_OF_LIGHT_KM_S;
    use crate::velocity::Velocity;

    #[test]
    fn test_solar_radii_per_day_conversion() {
        // 1 R☉/day = 695700 km / 86400 s ≈ 8.052 km/s
        let v = Velocity::from_solar_radii_per_day(1.0);
        assert_relative_eq!(v.to_km_per_sec(), 8.0521, epsilon = 1e-3);
    }

    #[test]
    fn test_round_trip() {
        let v = Velocity::from_km_per_sec(42.0);
        let round_trip = Velocity::from_solar_radii_per_day(v.to_solar_radii_per_day());
        assert_relative_eq!(round_trip.to_km_per_sec(), 42.0, epsilon = 1e-12);
    }

    #[test]
    fn test_beta() {
        let v = Velocity::from_km_per_sec(SPEED_OF_LIGHT_KM_S / 100.0);
        assert_relative_eq!(v.beta(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_arithmetic() {
        let a = Velocity::from_km_per_sec(10.0);
        let b = Velocity::from_km_per_sec(4.0);

        assert_relative_eq!((a + b).to_km_per_sec(), 14.0);
        assert_relative_eq!((a - b).to_km_per_sec(), 6.0);
        assert_relative_eq!((a * 0.5).to_km_per_sec(), 5.0);
        assert_relative_eq!((a / 2.0).to_km_per_sec(), 5.0);
        assert_relative_eq!((-a).to_km_per_sec(), -10.0);
    }
}
