#![warn(missing_docs)]
//! # modebench
//!
//! Mode-driven benchmarking harness for Rust.
//!
//! Each benchmark declares *how* it should be measured and the dispatcher
//! picks the timing strategy:
//! - **Throughput**: operations per time unit over a measurement window
//! - **AverageTime**: time per operation over a measurement window
//! - **SampleTime**: every invocation timed, reported as min / percentiles / max
//! - **SingleShotTime**: one cold invocation, no warmup
//! - **All**: shorthand for the four modes above
//!
//! A failing body (error or panic) only fails its own (unit, mode) pair;
//! other modes and benchmarks keep running.
//!
//! ## Quick Start
//!
//! ```ignore
//! use modebench::prelude::*;
//!
//! fn measure_all() -> Result<(), BodyError> {
//!     std::thread::sleep(std::time::Duration::from_millis(100));
//!     Ok(())
//! }
//!
//! modebench::benchmark!(
//!     "BenchmarkModes.measure_all",
//!     modes = [MeasurementMode::All],
//!     time_unit = TimeUnit::Microseconds,
//!     measure_all
//! );
//!
//! fn main() {
//!     let summary = modebench::run().unwrap();
//!     assert_eq!(summary.records.len(), 4);
//! }
//! ```
//!
//! ## Programmatic Use
//!
//! ```
//! use modebench::prelude::*;
//!
//! let unit = BenchmarkUnit::new("noop", || Ok(())).with_mode(MeasurementMode::SingleShotTime);
//! let records = Dispatcher::new(ExecutionConfig::default()).dispatch(&unit).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

// Re-export core types
pub use modebench_core::{
    BenchmarkDef, BenchmarkUnit, BodyError, ConfigurationError, ExecutionError, FailureKind,
    MeasurementMode, Phase, TimeUnit,
};

// Re-export runner types
pub use modebench_runner::{
    DispatchRecord, Dispatcher, ExecutionConfig, MeasurementResult, ModebenchConfig, Registry,
    RunSummary, RunnerConfig, Statistic, average_time_score, init_logging, resolve, run_registry,
    run_with_config, throughput_score,
};

// Re-export stats
pub use modebench_stats::{DistributionSummary, Percentiles};

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchmarkUnit, BodyError, DispatchRecord, Dispatcher, ExecutionConfig, MeasurementMode,
        MeasurementResult, Registry, Statistic, TimeUnit,
    };
}

/// Register a benchmark function with the global registry.
///
/// The body is a `fn() -> Result<(), BodyError>`. Modes are checked when the
/// registry is built, so an empty list is reported as a configuration error
/// rather than silently skipped.
///
/// ```ignore
/// modebench::benchmark!(
///     "Sleep100ms",
///     modes = [MeasurementMode::Throughput, MeasurementMode::SampleTime],
///     time_unit = TimeUnit::Milliseconds,
///     sleep_100ms
/// );
/// ```
#[macro_export]
macro_rules! benchmark {
    ($id:expr, modes = [$($mode:expr),* $(,)?], time_unit = $unit:expr, $body:path $(,)?) => {
        $crate::internal::inventory::submit! {
            $crate::BenchmarkDef {
                id: $id,
                modes: &[$($mode),*],
                time_unit: $unit,
                body: $body,
                file: file!(),
                line: line!(),
                module_path: module_path!(),
            }
        }
    };
}

/// Run every registered benchmark.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() {
///     let summary = modebench::run().unwrap();
///     println!("{} measurements", summary.records.len());
/// }
/// ```
pub use modebench_runner::run;
