//! Error Taxonomy
//!
//! Two kinds of failure exist and they never mix:
//! - [`ConfigurationError`]: a malformed declaration, fatal before any timing starts
//! - [`ExecutionError`]: a benchmark body failed while being timed; scoped to
//!   one (unit, mode) pair

use crate::mode::MeasurementMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Malformed or empty benchmark declaration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A unit declared no measurement modes.
    #[error("benchmark `{unit}` declares no measurement modes")]
    EmptyModeSet {
        /// Offending unit identifier
        unit: String,
    },

    /// A mode name did not match any known mode.
    #[error("unknown measurement mode `{0}`")]
    UnknownMode(String),

    /// A time unit name did not match any known unit.
    #[error("unknown time unit `{0}`")]
    UnknownTimeUnit(String),

    /// Two units share an identifier.
    #[error("benchmark `{0}` is registered more than once")]
    DuplicateUnit(String),

    /// An include/exclude pattern is not a valid regex.
    #[error("invalid benchmark pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Pattern as written
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
}

/// Phase of a measurement in which a body failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Untimed invocations before the measurement window
    Warmup,
    /// Timed invocations
    Measurement,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Warmup => f.write_str("warmup"),
            Phase::Measurement => f.write_str("measurement"),
        }
    }
}

/// How a body failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The body returned an error
    Error,
    /// The body panicked
    Panic,
    /// A composite mode reached execution without being resolved first
    Unresolved,
}

/// A benchmark body failed during one (unit, mode) measurement
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("benchmark `{unit}` failed in {mode} mode ({phase}, invocation {invocation}): {message}")]
pub struct ExecutionError {
    /// Unit identifier
    pub unit: String,
    /// Mode being measured
    pub mode: MeasurementMode,
    /// Phase the failure happened in
    pub phase: Phase,
    /// 1-based index of the failing invocation within its phase (0 = body never ran)
    pub invocation: u64,
    /// Failure kind
    pub kind: FailureKind,
    /// Error or panic message
    pub message: String,
}

impl ExecutionError {
    /// Error returned by the body itself
    pub fn body(
        unit: &str,
        mode: MeasurementMode,
        phase: Phase,
        invocation: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.to_string(),
            mode,
            phase,
            invocation,
            kind: FailureKind::Error,
            message: message.into(),
        }
    }

    /// Panic caught while running the body
    pub fn panic(
        unit: &str,
        mode: MeasurementMode,
        phase: Phase,
        invocation: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: FailureKind::Panic,
            ..Self::body(unit, mode, phase, invocation, message)
        }
    }

    /// Composite mode handed straight to execution
    pub fn unresolved(unit: &str, mode: MeasurementMode) -> Self {
        Self {
            kind: FailureKind::Unresolved,
            ..Self::body(
                unit,
                mode,
                Phase::Measurement,
                0,
                format!("`{mode}` must be resolved into base modes before execution"),
            )
        }
    }
}
