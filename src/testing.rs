//! Comparisons of fixed-point results against `f64` references
use num_complex::Complex;

/// Weight of one LSB at `F` fractional bits
pub const fn lsb<const F: u32>() -> f64 {
    1.0 / (1u64 << F) as f64
}

/// `|a - b| <= rtol * max(|a|, |b|) + atol`
pub fn isclose(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= rtol * a.abs().max(b.abs()) + atol
}

/// Equal lengths and every real and imaginary part passes [`isclose`]
pub fn complex_allclose(a: &[Complex<f64>], b: &[Complex<f64>], rtol: f64, atol: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(a, b)| isclose(a.re, b.re, rtol, atol) && isclose(a.im, b.im, rtol, atol))
}

/// Largest elementwise distance
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tolerances() {
        assert_eq!(lsb::<16>(), 1.0 / 65536.0);
        assert!(isclose(100.0, 100.5, 1e-2, 0.0));
        assert!(!isclose(1.0, 1.5, 1e-2, 0.1));
        let a = [Complex::new(1.0, 0.0)];
        assert!(!complex_allclose(&a, &[], 0.0, 1.0));
        assert!(complex_allclose(&a, &[Complex::new(1.0, 1e-9)], 0.0, 1e-6));
        assert_eq!(max_abs_diff(&[1.0, -2.0], &[1.5, 1.0]), 3.0);
    }
}
