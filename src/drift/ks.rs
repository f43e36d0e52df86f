//! Two-sample Kolmogorov-Smirnov test

use crate::error::{DomusError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of a two-sample KS test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KsOutcome {
    /// Maximum distance between the two empirical CDFs
    pub statistic: f64,
    /// Two-sided asymptotic p-value
    pub p_value: f64,
}

/// Two-sample Kolmogorov-Smirnov test for distribution comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct KolmogorovSmirnov;

impl KolmogorovSmirnov {
    /// Compare two samples and return the KS statistic with its p-value.
    ///
    /// Both samples must be non-empty. Identical samples yield a statistic
    /// of 0.0 and a p-value of exactly 1.0.
    pub fn two_sample(reference: &Array1<f64>, production: &Array1<f64>) -> Result<KsOutcome> {
        if reference.is_empty() || production.is_empty() {
            return Err(DomusError::StatisticComputation(
                "empty sample".to_string(),
            ));
        }

        let mut ref_sorted: Vec<f64> = reference.iter().copied().collect();
        let mut prod_sorted: Vec<f64> = production.iter().copied().collect();
        ref_sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        prod_sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        // Evaluate the ECDF difference at every observed value
        let mut combined: Vec<f64> = ref_sorted.iter().chain(prod_sorted.iter()).copied().collect();
        combined.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        combined.dedup();

        let statistic = combined
            .iter()
            .map(|&x| {
                let f1 = Self::ecdf(&ref_sorted, x);
                let f2 = Self::ecdf(&prod_sorted, x);
                (f1 - f2).abs()
            })
            .fold(0.0, f64::max);

        let n1 = ref_sorted.len() as f64;
        let n2 = prod_sorted.len() as f64;
        let en = n1 * n2 / (n1 + n2);
        let lambda = (en.sqrt() + 0.12 + 0.11 / en.sqrt()) * statistic;

        Ok(KsOutcome {
            statistic,
            p_value: Self::survival(lambda),
        })
    }

    /// Empirical CDF of a sorted sample at x
    fn ecdf(sorted: &[f64], x: f64) -> f64 {
        let count = sorted.partition_point(|&v| v <= x);
        count as f64 / sorted.len() as f64
    }

    /// Asymptotic Kolmogorov survival function Q_KS(lambda).
    ///
    /// Alternating series 2 * sum_{k>=1} (-1)^{k-1} exp(-2 k^2 lambda^2).
    /// When the series fails to converge (lambda near zero) the
    /// distributions are indistinguishable and the probability is 1.
    fn survival(lambda: f64) -> f64 {
        let mut fac = 2.0;
        let mut sum = 0.0;
        let mut prev_term = 0.0;

        for k in 1..=100 {
            let term = fac * (-2.0 * (k as f64 * lambda).powi(2)).exp();
            sum += term;
            if term.abs() <= 0.001 * prev_term || term.abs() <= 1e-8 * sum.abs() {
                return sum.clamp(0.0, 1.0);
            }
            fac = -fac;
            prev_term = term.abs();
        }

        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples() {
        let a = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let outcome = KolmogorovSmirnov::two_sample(&a, &a.clone()).unwrap();

        assert_eq!(outcome.statistic, 0.0);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_fully_shifted_samples() {
        let reference = Array1::from_vec(vec![1000.0, 1200.0, 1100.0, 1300.0]);
        let production = Array1::from_vec(vec![5000.0, 5200.0, 5100.0, 5300.0]);

        let outcome = KolmogorovSmirnov::two_sample(&reference, &production).unwrap();

        assert_eq!(outcome.statistic, 1.0);
        assert!(outcome.p_value < 0.05);
    }

    #[test]
    fn test_overlapping_samples_low_statistic() {
        let reference = Array1::from_vec((0..100).map(|i| i as f64).collect());
        let production = Array1::from_vec((0..100).map(|i| i as f64 + 0.5).collect());

        let outcome = KolmogorovSmirnov::two_sample(&reference, &production).unwrap();

        assert!(outcome.statistic < 0.1);
        assert!(outcome.p_value > 0.5);
    }

    #[test]
    fn test_p_value_bounds() {
        let reference = Array1::from_vec((0..50).map(|i| (i % 7) as f64).collect());
        let production = Array1::from_vec((0..80).map(|i| (i % 5) as f64 + 2.0).collect());

        let outcome = KolmogorovSmirnov::two_sample(&reference, &production).unwrap();

        assert!(outcome.statistic >= 0.0 && outcome.statistic <= 1.0);
        assert!(outcome.p_value >= 0.0 && outcome.p_value <= 1.0);
    }

    #[test]
    fn test_empty_sample_is_error() {
        let empty = Array1::from_vec(vec![]);
        let full = Array1::from_vec(vec![1.0, 2.0]);

        assert!(KolmogorovSmirnov::two_sample(&empty, &full).is_err());
        assert!(KolmogorovSmirnov::two_sample(&full, &empty).is_err());
    }
}
