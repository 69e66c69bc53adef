//! Percentile Computation
//!
//! Percentiles are computed from every recorded sample. Tail latency
//! percentiles (p99.9, p99.99) are the signal, so nothing is discarded.

use serde::{Deserialize, Serialize};

/// Percentiles reported for sampled durations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 50th percentile (median)
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p999: f64,
    /// 99.99th percentile
    pub p9999: f64,
}

impl Percentiles {
    /// Apply `f` to every percentile (used for unit conversion)
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            p50: f(self.p50),
            p90: f(self.p90),
            p95: f(self.p95),
            p99: f(self.p99),
            p999: f(self.p999),
            p9999: f(self.p9999),
        }
    }
}

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks.
///
/// # Examples
///
/// ```
/// # use modebench_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&samples, 50.0), 3.0);
/// assert_eq!(compute_percentile(&samples, 100.0), 5.0);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of already-sorted samples
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let p = (percentile / 100.0).clamp(0.0, 1.0);

            // Linear interpolation between nearest ranks
            let rank = p * (n - 1) as f64;
            let lower_idx = rank.floor() as usize;
            let upper_idx = (lower_idx + 1).min(n - 1);
            let fraction = rank - lower_idx as f64;

            sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
        }
    }
}

/// Compute all reported percentiles
pub fn compute_percentiles(samples: &[f64]) -> Percentiles {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentiles_of_sorted(&sorted)
}

pub(crate) fn percentiles_of_sorted(sorted: &[f64]) -> Percentiles {
    Percentiles {
        p50: percentile_of_sorted(sorted, 50.0),
        p90: percentile_of_sorted(sorted, 90.0),
        p95: percentile_of_sorted(sorted, 95.0),
        p99: percentile_of_sorted(sorted, 99.0),
        p999: percentile_of_sorted(sorted, 99.9),
        p9999: percentile_of_sorted(sorted, 99.99),
    }
}
