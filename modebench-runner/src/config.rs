//! Configuration loading from modebench.toml
//!
//! modebench configuration can be specified in a `modebench.toml` file in the
//! project root. The configuration is discovered by walking up from the
//! current directory.

use crate::execution::ExecutionConfig;
use crate::planner::{Overrides, compile_pattern};
use modebench_core::{ConfigurationError, MeasurementMode, TimeUnit};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up by [`ModebenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "modebench.toml";

/// modebench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModebenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Warmup duration before measurement (e.g., "1s")
    #[serde(default = "default_warmup")]
    pub warmup_time: String,
    /// Measurement window (e.g., "1s")
    #[serde(default = "default_measurement")]
    pub measurement_time: String,
    /// Minimum number of measured invocations
    #[serde(default)]
    pub min_iterations: Option<u64>,
    /// Maximum number of measured invocations
    #[serde(default)]
    pub max_iterations: Option<u64>,
    /// Only run benchmarks whose id matches this regex
    #[serde(default)]
    pub include: Option<String>,
    /// Skip benchmarks whose id matches this regex
    #[serde(default)]
    pub exclude: Option<String>,
    /// Modes to measure instead of the declared ones (e.g., ["thrpt", "ss"])
    #[serde(default)]
    pub modes: Option<Vec<String>>,
    /// Output time unit instead of the declared one (e.g., "us")
    #[serde(default)]
    pub time_unit: Option<String>,
    /// Show a progress bar
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_time: default_warmup(),
            measurement_time: default_measurement(),
            min_iterations: None,
            max_iterations: None,
            include: None,
            exclude: None,
            modes: None,
            time_unit: None,
            progress: default_progress(),
        }
    }
}

fn default_warmup() -> String {
    "1s".to_string()
}
fn default_measurement() -> String {
    "1s".to_string()
}
fn default_progress() -> bool {
    true
}

impl RunnerConfig {
    /// Timing configuration for the dispatcher
    pub fn execution_config(&self) -> Result<ExecutionConfig, ConfigurationError> {
        Ok(ExecutionConfig {
            warmup_time_ns: parse_duration(&self.warmup_time)?,
            measurement_time_ns: parse_duration(&self.measurement_time)?,
            min_iterations: self.min_iterations,
            max_iterations: self.max_iterations,
        })
    }

    /// Mode and time unit overrides; unknown names are rejected
    pub fn overrides(&self) -> Result<Overrides, ConfigurationError> {
        let modes = self
            .modes
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<MeasurementMode>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let time_unit = self
            .time_unit
            .as_deref()
            .map(str::parse::<TimeUnit>)
            .transpose()?;

        Ok(Overrides { modes, time_unit })
    }

    /// Compiled include pattern
    pub fn include_pattern(&self) -> Result<Option<Regex>, ConfigurationError> {
        self.include.as_deref().map(compile_pattern).transpose()
    }

    /// Compiled exclude pattern
    pub fn exclude_pattern(&self) -> Result<Option<Regex>, ConfigurationError> {
        self.exclude.as_deref().map(compile_pattern).transpose()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env filter directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "modebench=info".to_string()
}

impl ModebenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    ///
    /// Returns `Ok(None)` when no file exists; a file that exists but does not
    /// parse is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        Self::discover_from(std::env::current_dir()?)
    }

    /// Like [`ModebenchConfig::discover`], starting at `start` instead of the
    /// current directory
    pub fn discover_from(start: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }
}

/// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
pub fn parse_duration(s: &str) -> Result<u64, ConfigurationError> {
    let invalid = || ConfigurationError::InvalidDuration(s.to_string());

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    // Find where the number ends and unit begins
    let (num_part, unit_part) = trimmed
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| trimmed.split_at(i))
        .unwrap_or((trimmed, "s"));

    let value: f64 = num_part.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let multiplier: u64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" | "µs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(invalid()),
    };

    Ok((value * multiplier as f64) as u64)
}
