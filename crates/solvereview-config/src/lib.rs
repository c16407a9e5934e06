//! Configuration system for solvereview.
//!
//! A review batch is described in a TOML (or YAML) file: the run mode,
//! the instances to collect and where every output goes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use solvereview_config::ReviewConfig;
//! use solvereview_core::RunMode;
//!
//! let config = ReviewConfig::from_toml_str(r#"
//!     solve_mode = "full_solve"
//!     profile_top = 10
//!
//!     [[instances]]
//!     name = "Instance_1"
//!     output_dir = "code_review/output/Instance_1"
//!
//!     [[instances]]
//!     name = "Instance_2"
//!     output_dir = "code_review/output/Instance_2"
//! "#).unwrap();
//!
//! assert_eq!(config.solve_mode, RunMode::FullSolve);
//! assert_eq!(config.instances.len(), 2);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use solvereview_config::ReviewConfig;
//!
//! let config = ReviewConfig::load("review.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use solvereview_core::{Instance, RunMode};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rows kept in the cross-instance profile summary.
pub const DEFAULT_PROFILE_TOP: usize = 15;

/// Main review configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewConfig {
    /// Whether the batch solved or loaded a saved solution.
    #[serde(default)]
    pub solve_mode: RunMode,

    /// Instances to collect, in report order.
    #[serde(default)]
    pub instances: Vec<Instance>,

    /// Persisted instance table.
    #[serde(default = "default_result_csv")]
    pub result_csv: PathBuf,

    /// Cross-instance profile summary.
    #[serde(default = "default_profile_summary")]
    pub profile_summary: PathBuf,

    /// Combined comparison report.
    #[serde(default = "default_report")]
    pub report: PathBuf,

    /// Baseline compared against full solves.
    #[serde(default = "default_baseline_full_solve")]
    pub baseline_full_solve: PathBuf,

    /// Baseline compared against runs that loaded a solution.
    #[serde(default = "default_baseline_load_only")]
    pub baseline_load_only: PathBuf,

    /// Number of rows rendered in the profile summary.
    #[serde(default = "default_profile_top")]
    pub profile_top: usize,
}

fn default_result_csv() -> PathBuf {
    PathBuf::from("code_review/result_overview.csv")
}

fn default_profile_summary() -> PathBuf {
    PathBuf::from("code_review/profile_results.md")
}

fn default_report() -> PathBuf {
    PathBuf::from("code_review/results.md")
}

fn default_baseline_full_solve() -> PathBuf {
    PathBuf::from("code_review/ground_truth_result_overview.csv")
}

fn default_baseline_load_only() -> PathBuf {
    PathBuf::from("code_review/ground_truth_savepoint_result_overview.csv")
}

fn default_profile_top() -> usize {
    DEFAULT_PROFILE_TOP
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            solve_mode: RunMode::default(),
            instances: Vec::new(),
            result_csv: default_result_csv(),
            profile_summary: default_profile_summary(),
            report: default_report(),
            baseline_full_solve: default_baseline_full_solve(),
            baseline_load_only: default_baseline_load_only(),
            profile_top: default_profile_top(),
        }
    }
}

impl ReviewConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the run mode.
    pub fn with_solve_mode(mut self, mode: RunMode) -> Self {
        self.solve_mode = mode;
        self
    }

    /// Appends an instance.
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Sets the instance table path.
    pub fn with_result_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.result_csv = path.into();
        self
    }

    /// Sets the profile summary path.
    pub fn with_profile_summary(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile_summary = path.into();
        self
    }

    /// Sets the report path.
    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report = path.into();
        self
    }

    /// Sets the baseline for `mode`.
    pub fn with_baseline(mut self, mode: RunMode, path: impl Into<PathBuf>) -> Self {
        match mode {
            RunMode::FullSolve => self.baseline_full_solve = path.into(),
            RunMode::LoadOnly => self.baseline_load_only = path.into(),
        }
        self
    }

    /// Sets the number of profile summary rows.
    pub fn with_profile_top(mut self, top: usize) -> Self {
        self.profile_top = top;
        self
    }

    /// Returns the baseline compared against batches run in `mode`.
    pub fn baseline_path(&self, mode: RunMode) -> &Path {
        match mode {
            RunMode::FullSolve => &self.baseline_full_solve,
            RunMode::LoadOnly => &self.baseline_load_only,
        }
    }

    /// Checks that the batch can be aggregated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when there are no instances, when
    /// two instances share a name, or when `profile_top` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instances.is_empty() {
            return Err(ConfigError::Invalid("no instances configured".to_string()));
        }

        let mut seen = BTreeSet::new();
        for instance in &self.instances {
            if !seen.insert(instance.key.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate instance `{}`",
                    instance.key
                )));
            }
        }

        if self.profile_top == 0 {
            return Err(ConfigError::Invalid(
                "profile_top must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
