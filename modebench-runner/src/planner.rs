//! Benchmark Planner
//!
//! Builds the execution plan from a registry.
//!
//! - Regex include/exclude on unit id
//! - Run-level overrides of declared modes and output time unit
//!
//! Ordering: units are sorted alphabetically by id for deterministic execution.

use crate::dispatcher::resolve;
use crate::registry::Registry;
use modebench_core::{BenchmarkUnit, ConfigurationError, MeasurementMode, TimeUnit};
use regex::Regex;

/// Run-level replacements for what units declare
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Modes to measure instead of each unit's declaration
    pub modes: Option<Vec<MeasurementMode>>,
    /// Output time unit instead of each unit's declaration
    pub time_unit: Option<TimeUnit>,
}

/// Execution plan for benchmarks
#[derive(Debug)]
pub struct ExecutionPlan {
    /// Ordered list of units to run
    pub units: Vec<BenchmarkUnit>,
}

/// Build execution plan from registered units
///
/// Units whose overridden mode set cannot be resolved are rejected here, so
/// the plan only contains runnable units.
pub fn build_plan(
    registry: &Registry,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
    overrides: &Overrides,
) -> Result<ExecutionPlan, ConfigurationError> {
    let mut units = registry
        .units()
        .iter()
        .filter(|u| include.is_none_or(|re| re.is_match(u.id())))
        .filter(|u| !exclude.is_some_and(|re| re.is_match(u.id())))
        .map(|u| apply_overrides(u.clone(), overrides))
        .collect::<Vec<_>>();

    for unit in &units {
        resolve(unit)?;
    }

    // Sort alphabetically for deterministic execution order
    units.sort_by(|a, b| a.id().cmp(b.id()));

    Ok(ExecutionPlan { units })
}

fn apply_overrides(mut unit: BenchmarkUnit, overrides: &Overrides) -> BenchmarkUnit {
    if let Some(modes) = &overrides.modes {
        unit = unit.with_modes(modes.iter().copied());
    }
    if let Some(time_unit) = overrides.time_unit {
        unit = unit.with_time_unit(time_unit);
    }
    unit
}

/// Compile an include/exclude pattern
pub fn compile_pattern(pattern: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(pattern).map_err(|e| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
