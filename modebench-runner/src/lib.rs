#![warn(missing_docs)]
//! modebench Runner Library
//!
//! This crate owns the mode dispatcher and everything needed to drive it:
//! registry, planner, timing strategies and `modebench.toml` configuration.
//! Use `modebench::run()` (or `modebench_runner::run()`) in your main function
//! to run every registered benchmark.
//!
//! # Example
//!
//! ```ignore
//! use modebench::prelude::*;
//!
//! fn sleep_100ms() -> Result<(), BodyError> {
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//!     Ok(())
//! }
//!
//! modebench::benchmark!("Sleep100ms", modes = [MeasurementMode::All], time_unit = TimeUnit::Microseconds, sleep_100ms);
//!
//! fn main() -> anyhow::Result<()> {
//!     let summary = modebench_runner::run()?;
//!     println!("{}", serde_json::to_string_pretty(&summary)?);
//!     Ok(())
//! }
//! ```

mod config;
mod dispatcher;
mod execution;
mod planner;
mod registry;
mod result;

pub use config::*;
pub use dispatcher::{Dispatcher, resolve};
pub use execution::{ExecutionConfig, average_time_score, throughput_score};
pub use planner::{ExecutionPlan, Overrides, build_plan, compile_pattern};
pub use registry::Registry;
pub use result::{DispatchRecord, MeasurementResult, RunSummary, Statistic};

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, writing to stderr.
///
/// Invalid filter directives fall back to `modebench=info`. Does nothing if
/// a subscriber is already installed.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("modebench=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run every registered benchmark.
/// This is the main entry point for benchmark binaries.
///
/// Configuration comes from the nearest `modebench.toml`, or defaults.
pub fn run() -> anyhow::Result<RunSummary> {
    let config = ModebenchConfig::discover()?.unwrap_or_default();
    run_with_config(&config)
}

/// Run every registered benchmark with explicit configuration.
pub fn run_with_config(config: &ModebenchConfig) -> anyhow::Result<RunSummary> {
    init_logging(&config.logging.filter);

    let registry = Registry::discover()?;
    run_registry(&registry, &config.runner)
}

/// Plan and run the units of `registry`.
///
/// All configuration problems (durations, patterns, overrides, mode sets)
/// are reported before the first measurement.
pub fn run_registry(registry: &Registry, runner: &RunnerConfig) -> anyhow::Result<RunSummary> {
    let execution = runner.execution_config()?;
    let overrides = runner.overrides()?;
    let include = runner.include_pattern()?;
    let exclude = runner.exclude_pattern()?;

    let plan = build_plan(registry, include.as_ref(), exclude.as_ref(), &overrides)?;
    if plan.units.is_empty() {
        warn!(registered = registry.len(), "no benchmarks matched");
    } else {
        info!(units = plan.units.len(), "running benchmarks");
    }

    let started_at = Utc::now();
    let records = Dispatcher::new(execution)
        .with_progress(runner.progress)
        .run(&plan.units)?;
    let finished_at = Utc::now();

    let summary = RunSummary {
        started_at,
        finished_at,
        records,
    };
    if summary.failure_count() > 0 {
        warn!(failed = summary.failure_count(), "some measurements failed");
    }

    Ok(summary)
}
