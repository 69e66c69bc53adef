//! Measurement Modes
//!
//! A benchmark declares which statistic it wants: throughput, average time,
//! a sampled distribution, or a single cold invocation. `All` is a
//! declaration shorthand that resolves to the four base modes; it is never
//! measured on its own.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistical strategy used to characterize a benchmark's execution time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementMode {
    /// Operations per time unit, counted over the measurement window
    #[serde(rename = "thrpt")]
    Throughput,
    /// Time per operation, averaged over the measurement window
    #[serde(rename = "avgt")]
    AverageTime,
    /// Per-invocation durations summarized as a distribution
    #[serde(rename = "sample")]
    SampleTime,
    /// Duration of exactly one invocation, without warmup
    #[serde(rename = "ss")]
    SingleShotTime,
    /// Every base mode
    #[serde(rename = "all")]
    All,
}

impl MeasurementMode {
    /// The non-composite modes, in the order `All` expands to
    pub const BASE: [MeasurementMode; 4] = [
        MeasurementMode::Throughput,
        MeasurementMode::AverageTime,
        MeasurementMode::SampleTime,
        MeasurementMode::SingleShotTime,
    ];

    /// Short label used in configuration and result records
    pub fn short_label(self) -> &'static str {
        match self {
            MeasurementMode::Throughput => "thrpt",
            MeasurementMode::AverageTime => "avgt",
            MeasurementMode::SampleTime => "sample",
            MeasurementMode::SingleShotTime => "ss",
            MeasurementMode::All => "all",
        }
    }

    /// Whether this mode stands for several base modes
    pub fn is_composite(self) -> bool {
        matches!(self, MeasurementMode::All)
    }

    /// Base modes this mode stands for
    pub fn expand(self) -> &'static [MeasurementMode] {
        match self {
            MeasurementMode::Throughput => &Self::BASE[0..1],
            MeasurementMode::AverageTime => &Self::BASE[1..2],
            MeasurementMode::SampleTime => &Self::BASE[2..3],
            MeasurementMode::SingleShotTime => &Self::BASE[3..4],
            MeasurementMode::All => &Self::BASE,
        }
    }

    /// Whether the mode repeats the body over a measurement window
    pub fn is_windowed(self) -> bool {
        matches!(
            self,
            MeasurementMode::Throughput | MeasurementMode::AverageTime | MeasurementMode::SampleTime
        )
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

impl FromStr for MeasurementMode {
    type Err = ConfigurationError;

    /// Accepts a short label (`thrpt`) or a variant name (`Throughput`,
    /// `average_time`, `single-shot-time`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "thrpt" | "throughput" => Ok(MeasurementMode::Throughput),
            "avgt" | "averagetime" => Ok(MeasurementMode::AverageTime),
            "sample" | "sampletime" => Ok(MeasurementMode::SampleTime),
            "ss" | "singleshottime" | "singleshot" => Ok(MeasurementMode::SingleShotTime),
            "all" => Ok(MeasurementMode::All),
            _ => Err(ConfigurationError::UnknownMode(s.to_string())),
        }
    }
}

/// Expand a declared mode list into the base modes to measure.
///
/// Declaration order is kept and repeated modes collapse onto their first
/// occurrence. `All` expands in place.
pub fn resolve_modes(
    unit_id: &str,
    declared: &[MeasurementMode],
) -> Result<Vec<MeasurementMode>, ConfigurationError> {
    if declared.is_empty() {
        return Err(ConfigurationError::EmptyModeSet {
            unit: unit_id.to_string(),
        });
    }

    let mut resolved = Vec::with_capacity(MeasurementMode::BASE.len());
    for mode in declared.iter().flat_map(|m| m.expand()) {
        if !resolved.contains(mode) {
            resolved.push(*mode);
        }
    }

    Ok(resolved)
}
