//! Benchmark Modes - choosing what to measure
//!
//! Every benchmark here does the same thing: sleep for 100ms. What differs is
//! the declared measurement mode, and with it the statistic that comes back.
//!
//! Run with: cargo run --example benchmark_modes -p modebench-demos --release
//!
//! A `modebench.toml` next to the workspace can shorten the windows, e.g.
//! `warmup_time = "0s"` and `measurement_time = "500ms"` under `[runner]`.

use modebench::benchmark;
use modebench::prelude::*;
use std::time::Duration;

fn sleep_100ms() -> Result<(), BodyError> {
    std::thread::sleep(Duration::from_millis(100));
    Ok(())
}

// ---------------------------------------------------------------------------
// Throughput: operations per unit of time. Reported as ops/s here.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_throughput",
    modes = [MeasurementMode::Throughput],
    time_unit = TimeUnit::Seconds,
    sleep_100ms
);

// ---------------------------------------------------------------------------
// AverageTime: time per operation, the reciprocal of throughput.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_avg_time",
    modes = [MeasurementMode::AverageTime],
    time_unit = TimeUnit::Microseconds,
    sleep_100ms
);

// ---------------------------------------------------------------------------
// SampleTime: every invocation is timed, giving min, percentiles and max.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_samples",
    modes = [MeasurementMode::SampleTime],
    time_unit = TimeUnit::Microseconds,
    sleep_100ms
);

// ---------------------------------------------------------------------------
// SingleShotTime: one cold invocation, no warmup. Useful for startup costs.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_single_shot",
    modes = [MeasurementMode::SingleShotTime],
    time_unit = TimeUnit::Microseconds,
    sleep_100ms
);

// ---------------------------------------------------------------------------
// Several modes at once: one record per mode.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_multiple",
    modes = [
        MeasurementMode::Throughput,
        MeasurementMode::AverageTime,
        MeasurementMode::SampleTime,
        MeasurementMode::SingleShotTime,
    ],
    time_unit = TimeUnit::Microseconds,
    sleep_100ms
);

// ---------------------------------------------------------------------------
// All: same four records as above, without listing them.
// ---------------------------------------------------------------------------

benchmark!(
    "BenchmarkModes.measure_all",
    modes = [MeasurementMode::All],
    time_unit = TimeUnit::Microseconds,
    sleep_100ms
);

fn main() {
    let summary = match modebench::run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    if summary.failure_count() > 0 {
        std::process::exit(2);
    }
}
