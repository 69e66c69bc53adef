#![warn(missing_docs)]
//! modebench Statistics
//!
//! Summaries for sample-time measurements:
//! - Percentile calculation preserving tail latency signals
//! - Distribution summary (min, percentiles, max, mean, stddev)

mod percentiles;
mod summary;

pub use percentiles::{Percentiles, compute_percentile, compute_percentiles};
pub use summary::{DistributionSummary, summarize, summarize_nanos};
