//! Distribution Summary
//!
//! Sample-time measurements are reported as a distribution rather than one
//! scalar: minimum, percentiles, maximum, plus mean and standard deviation.
//! Everything is computed from all samples; nothing is treated as an outlier.

use crate::percentiles::{Percentiles, percentiles_of_sorted};
use serde::{Deserialize, Serialize};

/// Summary of a sampled distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Number of samples summarized
    pub sample_count: usize,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (0 for fewer than two samples)
    pub std_dev: f64,
    /// Percentiles
    pub percentiles: Percentiles,
}

impl DistributionSummary {
    /// Express every value in another scale, e.g. nanoseconds to microseconds
    pub fn scaled(self, divisor: f64) -> Self {
        Self {
            sample_count: self.sample_count,
            min: self.min / divisor,
            max: self.max / divisor,
            mean: self.mean / divisor,
            std_dev: self.std_dev / divisor,
            percentiles: self.percentiles.map(|v| v / divisor),
        }
    }
}

/// Summarize raw samples
pub fn summarize(samples: &[f64]) -> DistributionSummary {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = if n == 0 {
        0.0
    } else {
        sorted.iter().sum::<f64>() / n as f64
    };

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    DistributionSummary {
        sample_count: n,
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        mean,
        std_dev,
        percentiles: percentiles_of_sorted(&sorted),
    }
}

/// Summarize integer nanosecond samples
pub fn summarize_nanos(samples: &[u64]) -> DistributionSummary {
    let samples: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
    summarize(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_summary() {
        let summary = summarize(&[3.0, 1.0, 5.0, 2.0, 4.0]);

        assert_eq!(summary.sample_count, 5);
        assert!((summary.mean - 3.0).abs() < 0.01);
        assert!((summary.percentiles.p50 - 3.0).abs() < 0.01);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert!((summary.std_dev - 2.5_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_tail_is_preserved() {
        let summary = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]);

        assert_eq!(summary.max, 100.0);
        assert!(summary.percentiles.p99 > 50.0);
        assert!(summary.mean > 10.0);
    }

    #[test]
    fn test_ordering_invariant() {
        let samples: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64).collect();
        let s = summarize(&samples);
        let p = s.percentiles;

        assert!(s.min <= p.p50);
        assert!(p.p50 <= p.p90 && p.p90 <= p.p95 && p.p95 <= p.p99);
        assert!(p.p99 <= p.p999 && p.p999 <= p.p9999);
        assert!(p.p9999 <= s.max);
    }

    #[test]
    fn test_constant_samples() {
        let summary = summarize(&[100.0; 5]);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.min, summary.max);
        assert_eq!(summary.percentiles.p9999, 100.0);
    }

    #[test]
    fn test_empty_samples() {
        let summary = summarize(&[]);

        assert_eq!(summary.sample_count, 0);
        assert!((summary.mean - 0.0).abs() < f64::EPSILON);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 0.0);
    }

    #[test]
    fn test_scaled() {
        let summary = summarize_nanos(&[1_000, 2_000, 3_000]).scaled(1_000.0);

        assert_eq!(summary.sample_count, 3);
        assert!((summary.min - 1.0).abs() < 1e-9);
        assert!((summary.max - 3.0).abs() < 1e-9);
        assert!((summary.mean - 2.0).abs() < 1e-9);
        assert!((summary.percentiles.p50 - 2.0).abs() < 1e-9);
    }
}
