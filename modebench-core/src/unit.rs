//! Benchmark Units
//!
//! A [`BenchmarkUnit`] is one named operation plus its declared measurement
//! modes and output time unit. Units are built once and never mutated; the
//! builder methods consume `self`.

use crate::BenchmarkDef;
use crate::error::ConfigurationError;
use crate::mode::MeasurementMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Error a benchmark body may return
pub type BodyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shared benchmark body
pub type BodyFn = Arc<dyn Fn() -> Result<(), BodyError> + Send + Sync + 'static>;

/// Time unit results are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// 1e-9 seconds
    #[serde(rename = "ns")]
    Nanoseconds,
    /// 1e-6 seconds
    #[serde(rename = "us")]
    Microseconds,
    /// 1e-3 seconds
    #[serde(rename = "ms")]
    Milliseconds,
    /// 1 second
    #[default]
    #[serde(rename = "s")]
    Seconds,
    /// 60 seconds
    #[serde(rename = "min")]
    Minutes,
}

impl TimeUnit {
    /// Nanoseconds in one unit
    pub fn nanos_per_unit(self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1.0,
            TimeUnit::Microseconds => 1_000.0,
            TimeUnit::Milliseconds => 1_000_000.0,
            TimeUnit::Seconds => 1_000_000_000.0,
            TimeUnit::Minutes => 60_000_000_000.0,
        }
    }

    /// Convert a nanosecond quantity into this unit
    #[inline]
    pub fn from_nanos(self, nanos: f64) -> f64 {
        nanos / self.nanos_per_unit()
    }

    /// Short label (`ns`, `us`, `ms`, `s`, `min`)
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ns" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "µs" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "minutes" => Ok(TimeUnit::Minutes),
            _ => Err(ConfigurationError::UnknownTimeUnit(s.to_string())),
        }
    }
}

/// A named, measurable operation
#[derive(Clone)]
pub struct BenchmarkUnit {
    id: String,
    body: BodyFn,
    modes: Vec<MeasurementMode>,
    time_unit: TimeUnit,
}

impl BenchmarkUnit {
    /// Create a unit with no modes and seconds as its output unit
    pub fn new<F>(id: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> Result<(), BodyError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            body: Arc::new(body),
            modes: Vec::new(),
            time_unit: TimeUnit::default(),
        }
    }

    /// Build a unit from a static registration
    pub fn from_def(def: &BenchmarkDef) -> Self {
        let body = def.body;
        Self {
            id: def.id.to_string(),
            body: Arc::new(body),
            modes: def.modes.to_vec(),
            time_unit: def.time_unit,
        }
    }

    /// Add one mode to the declaration
    pub fn with_mode(mut self, mode: MeasurementMode) -> Self {
        self.modes.push(mode);
        self
    }

    /// Replace the declared modes
    pub fn with_modes(mut self, modes: impl IntoIterator<Item = MeasurementMode>) -> Self {
        self.modes = modes.into_iter().collect();
        self
    }

    /// Set the output time unit
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Unit identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Modes as declared (unresolved)
    pub fn modes(&self) -> &[MeasurementMode] {
        &self.modes
    }

    /// Output time unit
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Run the body once
    #[inline]
    pub fn invoke(&self) -> Result<(), BodyError> {
        (self.body)()
    }
}

impl fmt::Debug for BenchmarkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkUnit")
            .field("id", &self.id)
            .field("modes", &self.modes)
            .field("time_unit", &self.time_unit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_time_unit_conversion() {
        let nanos = 100_000_000.0; // 100ms
        let us = TimeUnit::Microseconds.from_nanos(nanos);
        let ms = TimeUnit::Milliseconds.from_nanos(nanos);

        assert!((TimeUnit::Nanoseconds.from_nanos(nanos) - 1e8).abs() < 1e-6);
        assert!((us - 100_000.0).abs() < 1e-9);
        assert!((ms - 100.0).abs() < 1e-9);
        assert!((TimeUnit::Seconds.from_nanos(nanos) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("us".parse::<TimeUnit>(), Ok(TimeUnit::Microseconds));
        let long_name: TimeUnit = "Milliseconds".parse().unwrap();
        assert_eq!(long_name, TimeUnit::Milliseconds);

        let err = "fortnights".parse::<TimeUnit>().unwrap_err();
        let expected = ConfigurationError::UnknownTimeUnit("fortnights".into());
        assert_eq!(err, expected);

        for unit in [TimeUnit::Nanoseconds, TimeUnit::Seconds, TimeUnit::Minutes] {
            assert_eq!(unit.label().parse::<TimeUnit>(), Ok(unit));
        }
    }

    #[test]
    fn test_default_time_unit_is_seconds() {
        let unit = BenchmarkUnit::new("noop", || Ok(()));
        assert_eq!(unit.time_unit(), TimeUnit::Seconds);
        assert!(unit.modes().is_empty());
    }

    #[test]
    fn test_builder() {
        let unit = BenchmarkUnit::new("noop", || Ok(()))
            .with_mode(MeasurementMode::Throughput)
            .with_mode(MeasurementMode::SampleTime)
            .with_time_unit(TimeUnit::Microseconds);

        assert_eq!(unit.id(), "noop");
        assert_eq!(
            unit.modes(),
            &[MeasurementMode::Throughput, MeasurementMode::SampleTime]
        );
        assert_eq!(unit.time_unit(), TimeUnit::Microseconds);

        let replaced = unit.with_modes([MeasurementMode::All]);
        assert_eq!(replaced.modes(), &[MeasurementMode::All]);
    }

    #[test]
    fn test_invoke_calls_body() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let unit = BenchmarkUnit::new("count", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        unit.invoke().unwrap();
        unit.clone().invoke().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invoke_propagates_error() {
        let unit = BenchmarkUnit::new("fails", || Err("interrupted".into()));
        let err = unit.invoke().unwrap_err();
        assert_eq!(err.to_string(), "interrupted");
    }

    #[test]
    fn test_from_def() {
        fn body() -> Result<(), BodyError> {
            Ok(())
        }
        let def = BenchmarkDef {
            id: "static_def",
            modes: &[MeasurementMode::AverageTime],
            time_unit: TimeUnit::Milliseconds,
            body,
            file: file!(),
            line: line!(),
            module_path: module_path!(),
        };

        let unit = BenchmarkUnit::from_def(&def);
        assert_eq!(unit.id(), "static_def");
        assert_eq!(unit.modes(), &[MeasurementMode::AverageTime]);
        assert_eq!(unit.time_unit(), TimeUnit::Milliseconds);
        assert!(unit.invoke().is_ok());
    }
}
