mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, TAU};

    use crate::angle::Angle;

    #[test]
    fn test_degree_radian_conversions() {
        let right = Angle::from_degrees(90.0);
        assert_relative_eq!(right.to_radians(), PI / 2.0, epsilon = 1e-15);

        let pi = Angle::from_radians(PI);
        assert_relative_eq!(pi.to_degrees(), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degree_round_trip() {
        let original = 37.482;
        let angle = Angle::from_degrees(original);
        assert_relative_eq!(angle.to_degrees(), original, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_wraps_into_range() {
        let wrapped = Angle::from_radians(3.0 * TAU + 0.25).normalized();
        assert_relative_eq!(wrapped.to_radians(), 0.25, epsilon = 1e-12);

        let negative = Angle::from_radians(-0.25).normalized();
        assert_relative_eq!(negative.to_radians(), TAU - 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_trig_helpers() {
        let a = Angle::from_degrees(60.0);
        assert_relative_eq!(a.cos(), 0.5, epsilon = 1e-15);
        assert_relative_eq!(a.sin(), 3.0_f64.sqrt() / 2.0, epsilon = 1e-15);

        let (s, c) = a.sin_cos();
        assert_relative_eq!(s, a.sin());
        assert_relative_eq!(c, a.cos());
    }

    #[test]
    fn test_arithmetic() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(60.0);

        assert_relative_eq!((a + b).to_degrees(), 90.0, epsilon = 1e-12);
        assert_relative_eq!((b - a).to_degrees(), 30.0, epsilon = 1e-12);
        assert_relative_eq!((a * 3.0).to_degrees(), 90.0, epsilon = 1e-12);
        assert_relative_eq!((b / 2.0).to_degrees(), 30.0, epsilon = 1e-12);
        assert_relative_eq!((-a).to_degrees(), -30.0, epsilon = 1e-12);
    }
}
