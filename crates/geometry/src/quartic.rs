//! Real roots of polynomials up to degree four.
//!
//! The ellipse-ellipse intersection reduces two conics to a quartic in one
//! variable. Roots are taken from the eigenvalues of the companion matrix
//! (nalgebra Schur decomposition), which is robust against the coefficient
//! cancellation that closed-form quartic formulas suffer from; callers
//! polish the surviving real roots on the original system.

use nalgebra::DMatrix;

/// Relative threshold below which a leading coefficient is treated as zero.
const DEGREE_EPS: f64 = 1e-12;

/// Imaginary-part tolerance for accepting an eigenvalue as a real root.
const IMAG_EPS: f64 = 1e-7;

/// Real roots of `c[0] + c[1]·x + c[2]·x² + c[3]·x³ + c[4]·x⁴ = 0`.
///
/// Coefficients are in ascending order. The effective degree is found by
/// trimming leading coefficients that are negligible relative to the
/// largest magnitude coefficient; degenerate (identically-zero) input
/// yields no roots. Roots are returned in ascending order, duplicates
/// included as they appear.
pub fn real_roots(coeffs: &[f64; 5]) -> Vec<f64> {
    let scale = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if scale == 0.0 {
        return Vec::new();
    }

    let mut degree = 4;
    while degree > 0 && coeffs[degree].abs() < DEGREE_EPS * scale {
        degree -= 1;
    }

    let mut roots = match degree {
        0 => Vec::new(),
        1 => vec![-coeffs[0] / coeffs[1]],
        2 => quadratic_roots(coeffs[2], coeffs[1], coeffs[0]),
        _ => companion_roots(&coeffs[..=degree]),
    };
    roots.sort_by(|a, b| a.partial_cmp(b).expect("polynomial roots are finite"));
    roots
}

/// Real roots of `a·x² + b·x + c = 0` using the numerically stable form.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        return vec![0.0, 0.0];
    }
    vec![q / a, c / q]
}

/// Real eigenvalues of the monic companion matrix of `coeffs`.
fn companion_roots(coeffs: &[f64]) -> Vec<f64> {
    let n = coeffs.len() - 1;
    let lead = coeffs[n];

    let mut companion = DMatrix::<f64>::zeros(n, n);
    for i in 1..n {
        companion[(i, i - 1)] = 1.0;
    }
    for i in 0..n {
        companion[(i, n - 1)] = -coeffs[i] / lead;
    }

    let eigen = companion.complex_eigenvalues();
    eigen
        .iter()
        .filter(|z| z.im.abs() <= IMAG_EPS * (1.0 + z.re.abs()))
        .map(|z| z.re)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_roots(coeffs: [f64; 5], expected: &[f64], tol: f64) {
        let roots = real_roots(&coeffs);
        assert_eq!(roots.len(), expected.len(), "roots: {roots:?}");
        for (r, e) in roots.iter().zip(expected) {
            assert_relative_eq!(r, e, epsilon = tol, max_relative = tol);
        }
    }

    #[test]
    fn factored_quartic() {
        // (x-1)(x+2)(x-3)(x+4) = x⁴ + 2x³ - 13x² - 14x + 24
        assert_roots([24.0, -14.0, -13.0, 2.0, 1.0], &[-4.0, -2.0, 1.0, 3.0], 1e-9);
    }

    #[test]
    fn quartic_with_two_real_roots() {
        // (x² + 1)(x - 2)(x + 5) = x⁴ + 3x³ - 9x² + 3x - 10
        assert_roots([-10.0, 3.0, -9.0, 3.0, 1.0], &[-5.0, 2.0], 1e-9);
    }

    #[test]
    fn no_real_roots() {
        // (x² + 1)(x² + 4)
        assert_roots([4.0, 0.0, 5.0, 0.0, 1.0], &[], 0.0);
    }

    #[test]
    fn degenerate_to_cubic() {
        // Leading coefficient negligible: x³ - x = x(x-1)(x+1)
        assert_roots([0.0, -1.0, 0.0, 1.0, 1e-16], &[-1.0, 0.0, 1.0], 1e-9);
    }

    #[test]
    fn degenerate_to_linear() {
        assert_roots([3.0, -1.5, 0.0, 0.0, 0.0], &[2.0], 1e-12);
    }

    #[test]
    fn all_zero_has_no_roots() {
        assert!(real_roots(&[0.0; 5]).is_empty());
    }
}
