#![warn(missing_docs)]
//! modebench Core - Data Model
//!
//! This crate provides the types every other modebench crate shares:
//! - `MeasurementMode` and mode resolution (`All` → base modes)
//! - `BenchmarkUnit` and `TimeUnit`
//! - `ConfigurationError` / `ExecutionError`
//! - Wall-clock `Timer` and measurement `Window`
//! - `BenchmarkDef` static registrations collected with `inventory`

mod error;
mod measure;
mod mode;
mod unit;

pub use error::{ConfigurationError, ExecutionError, FailureKind, Phase};
pub use measure::{Timer, Window};
pub use mode::{MeasurementMode, resolve_modes};
pub use unit::{BenchmarkUnit, BodyError, BodyFn, TimeUnit};

/// Benchmark definition registered via `modebench::benchmark!`
#[derive(Debug, Clone)]
pub struct BenchmarkDef {
    /// Unique identifier
    pub id: &'static str,
    /// Declared measurement modes
    pub modes: &'static [MeasurementMode],
    /// Output time unit
    pub time_unit: TimeUnit,
    /// Benchmark body
    pub body: fn() -> Result<(), BodyError>,
    /// Source file path
    pub file: &'static str,
    /// Source line number
    pub line: u32,
    /// Module path
    pub module_path: &'static str,
}

// Collect all registered benchmarks
inventory::collect!(BenchmarkDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<BenchmarkDef> {}
};
