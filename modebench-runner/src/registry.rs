//! Benchmark Registry
//!
//! Holds validated benchmark units. Validation happens at registration:
//! a unit whose modes do not resolve, or whose id is already taken, is
//! rejected with a [`ConfigurationError`].

use crate::dispatcher::resolve;
use fxhash::FxHashMap;
use std::collections::hash_map::Entry;
use modebench_core::{BenchmarkDef, BenchmarkUnit, ConfigurationError};

/// Validated set of benchmark units, in registration order
#[derive(Debug, Default)]
pub struct Registry {
    units: Vec<BenchmarkUnit>,
    /// id -> position in `units`
    index: FxHashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every benchmark submitted with `inventory`
    pub fn discover() -> Result<Self, ConfigurationError> {
        Self::from_defs(inventory::iter::<BenchmarkDef>)
    }

    /// Registry built from static definitions
    pub fn from_defs<'a>(
        defs: impl IntoIterator<Item = &'a BenchmarkDef>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(BenchmarkUnit::from_def(def))?;
        }
        Ok(registry)
    }

    /// Validate and add a unit
    pub fn register(&mut self, unit: BenchmarkUnit) -> Result<(), ConfigurationError> {
        resolve(&unit)?;

        match self.index.entry(unit.id().to_string()) {
            Entry::Occupied(entry) => Err(ConfigurationError::DuplicateUnit(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(self.units.len());
                self.units.push(unit);
                Ok(())
            }
        }
    }

    /// Registered units
    pub fn units(&self) -> &[BenchmarkUnit] {
        &self.units
    }

    /// Look up a unit by id
    pub fn get(&self, id: &str) -> Option<&BenchmarkUnit> {
        self.index.get(id).map(|&i| &self.units[i])
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
