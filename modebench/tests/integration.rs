//! Integration tests for modebench
//!
//! These tests verify the end-to-end behavior of mode dispatch with real
//! sleeping bodies, static registration and run-level configuration.

use modebench::{
    BenchmarkUnit, BodyError, ConfigurationError, DispatchRecord, Dispatcher, ExecutionConfig,
    FailureKind, MeasurementMode, Phase, Registry, RunnerConfig, Statistic, TimeUnit,
    average_time_score, resolve, run_registry, throughput_score,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

fn sleep_10ms() -> Result<(), BodyError> {
    std::thread::sleep(Duration::from_millis(10));
    Ok(())
}

modebench::benchmark!(
    "integration.sleep_10ms",
    modes = [MeasurementMode::AverageTime, MeasurementMode::SingleShotTime],
    time_unit = TimeUnit::Milliseconds,
    sleep_10ms
);

/// Unit that sleeps 100ms per call and counts its invocations
fn sleep_100ms(id: &str) -> (BenchmarkUnit, Arc<AtomicU64>) {
    let calls = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&calls);
    let unit = BenchmarkUnit::new(id, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(100));
        Ok(())
    });
    (unit, calls)
}

/// No warmup and a window shorter than two invocations
fn short_window() -> ExecutionConfig {
    ExecutionConfig {
        warmup_time_ns: 0,
        measurement_time_ns: 150_000_000,
        min_iterations: None,
        max_iterations: None,
    }
}

/// Single-shot of a 100ms sleep reports ~100ms from exactly one call
#[test]
fn test_single_shot_sleep_100ms() {
    let (unit, calls) = sleep_100ms("Sleep100ms");
    let unit = unit
        .with_mode(MeasurementMode::SingleShotTime)
        .with_time_unit(TimeUnit::Milliseconds);

    let records = Dispatcher::new(ExecutionConfig::default())
        .dispatch(&unit)
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let result = records[0].result().unwrap();
    assert_eq!(result.mode(), MeasurementMode::SingleShotTime);
    assert_eq!(result.invocations(), 1);

    let millis = result.score().unwrap();
    assert!(millis >= 100.0, "single shot took {millis}ms");
    assert!(millis < 400.0, "single shot took {millis}ms");
}

/// `All` resolves to four modes, each measured independently
#[test]
fn test_all_modes_sleep_100ms() {
    let (unit, _) = sleep_100ms("Sleep100ms");
    let unit = unit
        .with_mode(MeasurementMode::All)
        .with_time_unit(TimeUnit::Microseconds);

    assert_eq!(resolve(&unit).unwrap(), MeasurementMode::BASE);

    let records = Dispatcher::new(short_window()).dispatch(&unit).unwrap();
    assert_eq!(records.len(), 4);

    let modes: Vec<_> = records.iter().map(DispatchRecord::mode).collect();
    assert_eq!(modes, MeasurementMode::BASE);

    for record in &records {
        let result = record.result().unwrap();
        assert_eq!(result.unit_id(), "Sleep100ms");
        assert_eq!(result.time_unit(), TimeUnit::Microseconds);
    }

    // ~10 ops/s is ~0.00001 ops/us
    let thrpt = records[0].result().unwrap().score().unwrap();
    assert!(thrpt > 0.0 && thrpt <= 0.00001, "throughput {thrpt} ops/us");

    // ~100ms/op is ~100_000 us/op
    let avgt = records[1].result().unwrap().score().unwrap();
    assert!(avgt >= 100_000.0, "average {avgt} us/op");

    let dist = match records[2].result().unwrap().statistic() {
        Statistic::Distribution(dist) => dist,
        other => panic!("sample time produced {other:?}"),
    };
    assert!(dist.sample_count >= 1);
    assert!(dist.min >= 100_000.0);
    assert!(dist.min <= dist.percentiles.p50);
    assert!(dist.percentiles.p9999 <= dist.max);

    for record in [&records[0], &records[1], &records[3]] {
        let statistic = record.result().unwrap().statistic();
        let Statistic::Score { value } = statistic else {
            panic!("expected a score, got {statistic:?}");
        };
        assert!(*value > 0.0);
    }

    assert_eq!(records[3].result().unwrap().invocations(), 1);
}

/// A body failing on its third call fails sample time only
#[test]
fn test_sample_time_failure_is_isolated() {
    let calls = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&calls);
    let unit = BenchmarkUnit::new("Sleep100ms", move || {
        let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if call == 3 {
            return Err("sleep interrupted".into());
        }
        std::thread::sleep(Duration::from_millis(1));
        Ok(())
    })
    .with_modes([MeasurementMode::SampleTime, MeasurementMode::AverageTime]);

    let config = ExecutionConfig {
        min_iterations: Some(10),
        max_iterations: Some(10),
        ..short_window()
    };
    let records = Dispatcher::new(config).dispatch(&unit).unwrap();

    assert_eq!(records.len(), 2);

    let err = records[0].error().unwrap();
    assert_eq!(err.unit, "Sleep100ms");
    assert_eq!(err.mode, MeasurementMode::SampleTime);
    assert_eq!(err.phase, Phase::Measurement);
    assert_eq!(err.invocation, 3);
    assert_eq!(err.kind, FailureKind::Error);
    assert_eq!(err.message, "sleep interrupted");

    let avgt = records[1].result().unwrap();
    assert_eq!(avgt.mode(), MeasurementMode::AverageTime);
    assert_eq!(avgt.invocations(), 10);
}

/// A panicking unit does not stop the units after it
#[test]
fn test_panic_does_not_abort_run() {
    let boom = BenchmarkUnit::new("boom", || panic!("benchmark exploded"))
        .with_mode(MeasurementMode::Throughput);
    let (steady, calls) = sleep_100ms("steady");
    let steady = steady.with_mode(MeasurementMode::SingleShotTime);

    let records = Dispatcher::new(short_window())
        .run(&[boom, steady])
        .unwrap();

    assert_eq!(records.len(), 2);
    let err = records[0].error().unwrap();
    assert_eq!(err.kind, FailureKind::Panic);
    assert!(err.message.contains("benchmark exploded"));

    assert!(records[1].result().is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Empty mode sets are rejected before any timing
#[test]
fn test_empty_mode_set_is_configuration_error() {
    let (unit, calls) = sleep_100ms("nothing");

    let err = Dispatcher::new(short_window()).dispatch(&unit).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::EmptyModeSet {
            unit: "nothing".to_string()
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let (unit, _) = sleep_100ms("nothing");
    assert!(Registry::new().register(unit).is_err());
}

/// Throughput and average time agree for the same invocations and elapsed time
#[test]
fn test_throughput_and_average_time_are_reciprocal() {
    let unit = BenchmarkUnit::new("spin", || {
        std::hint::black_box((0..1_000u64).sum::<u64>());
        Ok(())
    })
    .with_modes([MeasurementMode::Throughput, MeasurementMode::AverageTime])
    .with_time_unit(TimeUnit::Nanoseconds);

    let config = ExecutionConfig {
        min_iterations: Some(1_000),
        max_iterations: Some(1_000),
        ..short_window()
    };
    let records = Dispatcher::new(config).dispatch(&unit).unwrap();

    let thrpt = records[0].result().unwrap();
    let avgt = records[1].result().unwrap();

    // Each score is the reciprocal of the other formula on its own counts
    let thrpt_score = thrpt.score().unwrap();
    let thrpt_as_avgt =
        average_time_score(thrpt.invocations(), thrpt.elapsed_ns(), thrpt.time_unit());
    assert!((thrpt_score * thrpt_as_avgt - 1.0).abs() < 1e-9);

    let avgt_score = avgt.score().unwrap();
    let avgt_as_thrpt =
        throughput_score(avgt.invocations(), avgt.elapsed_ns(), avgt.time_unit());
    assert!((avgt_score * avgt_as_thrpt - 1.0).abs() < 1e-9);
}

/// `benchmark!` registrations are discovered and runnable
#[test]
fn test_static_registration() {
    let registry = Registry::discover().unwrap();
    let unit = registry.get("integration.sleep_10ms").unwrap();

    assert_eq!(
        unit.modes(),
        &[MeasurementMode::AverageTime, MeasurementMode::SingleShotTime]
    );
    assert_eq!(unit.time_unit(), TimeUnit::Milliseconds);

    let runner = RunnerConfig {
        warmup_time: "0s".to_string(),
        measurement_time: "30ms".to_string(),
        include: Some("^integration\\.".to_string()),
        progress: false,
        ..RunnerConfig::default()
    };
    let summary = run_registry(&registry, &runner).unwrap();

    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.failure_count(), 0);
    let avgt = summary.records[0].result().unwrap().score().unwrap();
    assert!(avgt >= 10.0, "average {avgt} ms/op");
}

/// Failed pairs serialize as error records next to measured ones
#[test]
fn test_records_serialize_for_reporting() {
    let unit = BenchmarkUnit::new("mixed", || Err("nope".into()))
        .with_modes([MeasurementMode::SingleShotTime]);
    let ok = BenchmarkUnit::new("fine", || Ok(()))
        .with_mode(MeasurementMode::SingleShotTime);

    let records = Dispatcher::new(short_window()).run(&[unit, ok]).unwrap();
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["status"], "failed");
    assert_eq!(json[0]["mode"], "ss");
    assert_eq!(json[0]["message"], "nope");
    assert_eq!(json[1]["status"], "measured");
    assert_eq!(json[1]["statistic"]["kind"], "score");

    let back: Vec<DispatchRecord> = serde_json::from_value(json).unwrap();
    assert!(back[0].is_failed());
    assert_eq!(back[1].unit_id(), "fine");
    assert!(matches!(
        back[1].result().unwrap().statistic(),
        Statistic::Score { .. }
    ));
}
