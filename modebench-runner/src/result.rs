//! Result Records
//!
//! One record per (unit, mode): either a measurement or the error that
//! aborted it. Records are created once by the dispatcher and are read-only
//! afterwards; they serialize with serde for whatever consumes them.

use chrono::{DateTime, Utc};
use modebench_core::{BenchmarkUnit, ExecutionError, MeasurementMode, TimeUnit};
use modebench_stats::DistributionSummary;
use serde::{Deserialize, Serialize};

/// Statistic produced by a mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statistic {
    /// Single scalar: ops per time unit (throughput) or time per op
    Score {
        /// Value in the result's score unit
        value: f64,
    },
    /// Sampled durations, expressed in the result's time unit
    Distribution(DistributionSummary),
}

/// Outcome of measuring one unit in one base mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    unit_id: String,
    mode: MeasurementMode,
    time_unit: TimeUnit,
    invocations: u64,
    elapsed_ns: u64,
    statistic: Statistic,
}

impl MeasurementResult {
    pub(crate) fn new(
        unit: &BenchmarkUnit,
        mode: MeasurementMode,
        invocations: u64,
        elapsed_ns: u64,
        statistic: Statistic,
    ) -> Self {
        Self {
            unit_id: unit.id().to_string(),
            mode,
            time_unit: unit.time_unit(),
            invocations,
            elapsed_ns,
            statistic,
        }
    }

    /// Unit identifier
    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    /// Mode measured
    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    /// Time unit the statistic is expressed in
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Measured invocations (warmup excluded)
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Wall-clock nanoseconds spent in measurement
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Statistic
    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    /// Scalar score, if this mode produces one
    pub fn score(&self) -> Option<f64> {
        match self.statistic {
            Statistic::Score { value } => Some(value),
            Statistic::Distribution(_) => None,
        }
    }

    /// Distribution, if this mode produces one
    pub fn distribution(&self) -> Option<&DistributionSummary> {
        match &self.statistic {
            Statistic::Distribution(summary) => Some(summary),
            Statistic::Score { .. } => None,
        }
    }

    /// Unit of the score, e.g. `ops/s` or `us/op`
    pub fn score_unit(&self) -> String {
        match self.mode {
            MeasurementMode::Throughput => format!("ops/{}", self.time_unit),
            _ => format!("{}/op", self.time_unit),
        }
    }
}

/// Record handed to reporting for one (unit, mode) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchRecord {
    /// Measurement completed
    Measured(MeasurementResult),
    /// Body failed; no statistic
    Failed(ExecutionError),
}

impl DispatchRecord {
    /// Unit identifier
    pub fn unit_id(&self) -> &str {
        match self {
            DispatchRecord::Measured(result) => result.unit_id(),
            DispatchRecord::Failed(error) => &error.unit,
        }
    }

    /// Mode of this record
    pub fn mode(&self) -> MeasurementMode {
        match self {
            DispatchRecord::Measured(result) => result.mode(),
            DispatchRecord::Failed(error) => error.mode,
        }
    }

    /// Whether the measurement failed
    pub fn is_failed(&self) -> bool {
        matches!(self, DispatchRecord::Failed(_))
    }

    /// Measurement, if it succeeded
    pub fn result(&self) -> Option<&MeasurementResult> {
        match self {
            DispatchRecord::Measured(result) => Some(result),
            DispatchRecord::Failed(_) => None,
        }
    }

    /// Error, if it failed
    pub fn error(&self) -> Option<&ExecutionError> {
        match self {
            DispatchRecord::Failed(error) => Some(error),
            DispatchRecord::Measured(_) => None,
        }
    }
}

impl From<Result<MeasurementResult, ExecutionError>> for DispatchRecord {
    fn from(outcome: Result<MeasurementResult, ExecutionError>) -> Self {
        match outcome {
            Ok(result) => DispatchRecord::Measured(result),
            Err(error) => DispatchRecord::Failed(error),
        }
    }
}

/// All records of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// When dispatch started
    pub started_at: DateTime<Utc>,
    /// When dispatch finished
    pub finished_at: DateTime<Utc>,
    /// Records in execution order
    pub records: Vec<DispatchRecord>,
}

impl RunSummary {
    /// Number of failed (unit, mode) pairs
    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_failed()).count()
    }

    /// Records for one unit, in execution order
    pub fn records_for<'a>(&'a self, unit_id: &'a str) -> impl Iterator<Item = &'a DispatchRecord> {
        self.records.iter().filter(move |r| r.unit_id() == unit_id)
    }
}
