//! Mode Dispatcher
//!
//! Maps a unit's declared modes onto timing strategies and collects one
//! record per (unit, base mode).
//!
//! Failure scoping:
//! - Configuration errors (empty mode set) surface from [`resolve`] before
//!   anything is timed. [`Dispatcher::run`] resolves every unit up front, so a
//!   single bad declaration stops the run before the first measurement.
//! - Execution errors abort only their (unit, mode) pair and are recorded as
//!   [`DispatchRecord::Failed`]; sibling modes and later units still run.
//!
//! Execution is strictly sequential: one (unit, mode) pair at a time, modes in
//! resolved order, units in the order given.

use crate::execution::{
    ExecutionConfig, average_time_score, measure_window, single_shot, throughput_score, warmup,
};
use crate::result::{DispatchRecord, MeasurementResult, Statistic};
use indicatif::{ProgressBar, ProgressStyle};
use modebench_core::{
    BenchmarkUnit, ConfigurationError, ExecutionError, MeasurementMode, resolve_modes,
};
use modebench_stats::summarize_nanos;
use tracing::{debug, info, warn};

/// Base modes to measure for `unit`.
///
/// `All` expands to throughput, average time, sample time and single-shot
/// time; any other declaration is returned as declared.
pub fn resolve(unit: &BenchmarkUnit) -> Result<Vec<MeasurementMode>, ConfigurationError> {
    resolve_modes(unit.id(), unit.modes())
}

/// Runs units under their measurement modes
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: ExecutionConfig,
    show_progress: bool,
}

impl Dispatcher {
    /// Create a dispatcher with no progress output
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    /// Show a progress bar over (unit, mode) pairs during [`Dispatcher::run`]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Measure `unit` in one base mode.
    ///
    /// Single-shot ignores warmup and the window and invokes the body exactly
    /// once. Composite modes are refused without invoking the body.
    pub fn execute(
        &self,
        unit: &BenchmarkUnit,
        mode: MeasurementMode,
    ) -> Result<MeasurementResult, ExecutionError> {
        if mode.is_composite() {
            return Err(ExecutionError::unresolved(unit.id(), mode));
        }

        let time_unit = unit.time_unit();
        if !mode.is_windowed() {
            let elapsed_ns = single_shot(unit, mode)?;
            let score = Statistic::Score {
                value: time_unit.from_nanos(elapsed_ns as f64),
            };
            return Ok(MeasurementResult::new(unit, mode, 1, elapsed_ns, score));
        }

        warmup(unit, mode, &self.config)?;
        let record_durations = mode == MeasurementMode::SampleTime;
        let run = measure_window(unit, mode, &self.config, record_durations)?;

        let statistic = match mode {
            MeasurementMode::Throughput => Statistic::Score {
                value: throughput_score(run.invocations, run.elapsed_ns, time_unit),
            },
            MeasurementMode::AverageTime => Statistic::Score {
                value: average_time_score(run.invocations, run.elapsed_ns, time_unit),
            },
            _ => {
                let summary = summarize_nanos(&run.durations_ns);
                Statistic::Distribution(summary.scaled(time_unit.nanos_per_unit()))
            }
        };

        Ok(MeasurementResult::new(
            unit,
            mode,
            run.invocations,
            run.elapsed_ns,
            statistic,
        ))
    }

    /// Resolve `unit` and measure it in every resolved mode
    pub fn dispatch(
        &self,
        unit: &BenchmarkUnit,
    ) -> Result<Vec<DispatchRecord>, ConfigurationError> {
        let modes = resolve(unit)?;
        Ok(self.execute_modes(unit, &modes, &ProgressBar::hidden()))
    }

    /// Resolve every unit, then measure them in order.
    ///
    /// A configuration error in any unit is returned before any timing starts.
    pub fn run(&self, units: &[BenchmarkUnit]) -> Result<Vec<DispatchRecord>, ConfigurationError> {
        let resolved = units
            .iter()
            .map(|unit| resolve(unit).map(|modes| (unit, modes)))
            .collect::<Result<Vec<_>, _>>()?;

        let total: usize = resolved.iter().map(|(_, modes)| modes.len()).sum();
        let pb = self.progress_bar(total as u64);

        let mut records = Vec::with_capacity(total);
        for (unit, modes) in &resolved {
            records.extend(self.execute_modes(unit, modes, &pb));
        }

        pb.finish_with_message("Complete");
        Ok(records)
    }

    fn execute_modes(
        &self,
        unit: &BenchmarkUnit,
        modes: &[MeasurementMode],
        pb: &ProgressBar,
    ) -> Vec<DispatchRecord> {
        modes
            .iter()
            .map(|&mode| {
                pb.set_message(format!("{} [{}]", unit.id(), mode));
                info!(unit = unit.id(), %mode, "measuring");

                let outcome = self.execute(unit, mode);
                match &outcome {
                    Ok(result) => debug!(
                        unit = unit.id(),
                        %mode,
                        invocations = result.invocations(),
                        elapsed_ns = result.elapsed_ns(),
                        "measured"
                    ),
                    Err(err) => warn!(unit = unit.id(), %mode, error = %err, "measurement failed"),
                }

                pb.inc(1);
                DispatchRecord::from(outcome)
            })
            .collect()
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}
