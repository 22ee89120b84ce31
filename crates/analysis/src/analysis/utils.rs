//! Utility functions for analysis module
//!
//! Shared helper functions used across analysis submodules.

/// Mean of a slice; `NaN` when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the `n - 1` denominator; 0 when fewer than two
/// values.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

/// Cache for commonly used harmonic numbers
/// Note: harmonic_number(n) = sum_{i=1}^{n-1} 1/i
static HARMONIC_CACHE: [f64; 11] = [
    0.0,                // n=0 (unused)
    0.0,                // n=1
    1.0,                // n=2
    1.5,                // n=3
    1.8333333333333333, // n=4
    2.083333333333333,  // n=5
    2.283333333333333,  // n=6
    2.45,               // n=7
    2.5928571428571425, // n=8
    2.7178571428571425, // n=9
    2.8289682539682537, // n=10
];

/// `a1 = sum_{i=1}^{n-1} 1/i`
#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    if n < HARMONIC_CACHE.len() {
        HARMONIC_CACHE[n]
    } else {
        (1..n).map(|i| 1.0 / i as f64).sum()
    }
}

/// `a2 = sum_{i=1}^{n-1} 1/i^2`
#[inline]
pub fn harmonic_number_sq(n: usize) -> f64 {
    (1..n).map(|i| 1.0 / (i * i) as f64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_variance_uses_n_minus_one() {
        assert!((variance(&[1.0, 2.0, 3.0, 4.0]) - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(variance(&[7.0]), 0.0);
    }

    #[test]
    fn test_harmonic_cache_matches_sum() {
        for n in 2..11 {
            let direct: f64 = (1..n).map(|i| 1.0 / i as f64).sum();
            assert!((harmonic_number(n) - direct).abs() < 1e-12, "n = {n}");
        }
        assert!((harmonic_number_sq(3) - 1.25).abs() < 1e-12);
    }
}
