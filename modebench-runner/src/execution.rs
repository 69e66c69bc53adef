//! Benchmark Execution
//!
//! Timing disciplines shared by the measurement modes.
//!
//! ## Data Flow
//!
//! ```text
//!   BenchmarkUnit + base mode
//!          │
//!          ▼
//!   ExecutionConfig (warmup, window, min/max iterations)
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ warmup           │  untimed, skipped for single-shot
//! │ measure_window   │  repeat until window elapses
//! │ single_shot      │  exactly one invocation
//! └────────┬─────────┘
//!          │
//!          ▼
//!   WindowRun (invocations, elapsed, per-invocation durations)
//! ```
//!
//! Every body call goes through [`invoke`], which turns returned errors and
//! panics into an [`ExecutionError`] tagged with the unit, mode, phase and
//! invocation index.

use modebench_core::{
    BenchmarkUnit, ExecutionError, MeasurementMode, Phase, TimeUnit, Timer, Window,
};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Configuration for windowed measurements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Warmup time in nanoseconds (0 = no warmup)
    pub warmup_time_ns: u64,
    /// Measurement window in nanoseconds
    pub measurement_time_ns: u64,
    /// Minimum measured invocations, even if the window has elapsed
    pub min_iterations: Option<u64>,
    /// Maximum measured invocations, even if the window is still open
    pub max_iterations: Option<u64>,
}

impl ExecutionConfig {
    /// Effective (min, max) iteration bounds.
    ///
    /// At least one invocation is always measured; max is clamped up to min.
    pub fn iteration_bounds(&self) -> (u64, u64) {
        let min = self.min_iterations.unwrap_or(1).max(1);
        let max = self.max_iterations.unwrap_or(u64::MAX).max(min);
        (min, max)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            warmup_time_ns: 1_000_000_000,      // 1 second
            measurement_time_ns: 1_000_000_000, // 1 second
            min_iterations: None,
            max_iterations: None,
        }
    }
}

/// Measured portion of a windowed run
#[derive(Debug, Clone, Default)]
pub(crate) struct WindowRun {
    pub invocations: u64,
    pub elapsed_ns: u64,
    /// Per-invocation durations; empty unless recording was requested
    pub durations_ns: Vec<u64>,
}

/// Run the body once, converting errors and panics
pub(crate) fn invoke(
    unit: &BenchmarkUnit,
    mode: MeasurementMode,
    phase: Phase,
    invocation: u64,
) -> Result<(), ExecutionError> {
    match catch_unwind(AssertUnwindSafe(|| unit.invoke())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ExecutionError::body(
            unit.id(),
            mode,
            phase,
            invocation,
            err.to_string(),
        )),
        Err(panic) => Err(ExecutionError::panic(
            unit.id(),
            mode,
            phase,
            invocation,
            panic_message(panic.as_ref()),
        )),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Untimed invocations until the warmup time elapses; returns how many ran
pub(crate) fn warmup(
    unit: &BenchmarkUnit,
    mode: MeasurementMode,
    config: &ExecutionConfig,
) -> Result<u64, ExecutionError> {
    if config.warmup_time_ns == 0 {
        return Ok(0);
    }

    let window = Window::open(config.warmup_time_ns);
    let mut invocations = 0;
    while !window.is_elapsed() {
        invocations += 1;
        invoke(unit, mode, Phase::Warmup, invocations)?;
    }

    Ok(invocations)
}

/// Invoke repeatedly until the window elapses.
///
/// The window is checked only between invocations, so the last one always
/// runs to completion. Iteration bounds take precedence over the window.
pub(crate) fn measure_window(
    unit: &BenchmarkUnit,
    mode: MeasurementMode,
    config: &ExecutionConfig,
    record_durations: bool,
) -> Result<WindowRun, ExecutionError> {
    let (min_iterations, max_iterations) = config.iteration_bounds();
    let mut run = WindowRun::default();

    let window = Window::open(config.measurement_time_ns);
    loop {
        let min_iterations_met = run.invocations >= min_iterations;
        let max_iterations_reached = run.invocations >= max_iterations;

        if max_iterations_reached || (min_iterations_met && window.is_elapsed()) {
            break;
        }

        let invocation = run.invocations + 1;
        if record_durations {
            let timer = Timer::start();
            invoke(unit, mode, Phase::Measurement, invocation)?;
            run.durations_ns.push(timer.stop());
        } else {
            invoke(unit, mode, Phase::Measurement, invocation)?;
        }
        run.invocations = invocation;
    }
    run.elapsed_ns = window.elapsed_ns();

    Ok(run)
}

/// Time exactly one invocation; returns its duration in nanoseconds
pub(crate) fn single_shot(
    unit: &BenchmarkUnit,
    mode: MeasurementMode,
) -> Result<u64, ExecutionError> {
    let timer = Timer::start();
    invoke(unit, mode, Phase::Measurement, 1)?;
    Ok(timer.stop())
}

/// Operations per `time_unit`
pub fn throughput_score(invocations: u64, elapsed_ns: u64, time_unit: TimeUnit) -> f64 {
    let elapsed = time_unit.from_nanos(elapsed_ns.max(1) as f64);
    invocations as f64 / elapsed
}

/// `time_unit` per operation
pub fn average_time_score(invocations: u64, elapsed_ns: u64, time_unit: TimeUnit) -> f64 {
    if invocations == 0 {
        return 0.0;
    }
    time_unit.from_nanos(elapsed_ns.max(1) as f64) / invocations as f64
}
