//! Instance identity and output-directory conventions.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Run log written by the solver under an instance's output directory.
pub const LOG_FILE: &str = "out.log";
/// Solve listing written by the solver.
pub const LISTING_FILE: &str = "out.lst";
/// Per-statement profiling trace.
pub const PROFILE_FILE: &str = "out.prf";
/// Rendered per-instance profile table written by the aggregator.
pub const PROFILE_REPORT_FILE: &str = "profile_summary.md";

/// Name of one benchmark run, unique within a batch.
///
/// Used as the row key of every table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceKey(String);

impl InstanceKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for InstanceKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for InstanceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InstanceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One instance of a batch: its key and where the solver left its output.
///
/// # Example
///
/// ```
/// use solvereview_core::Instance;
/// use std::path::Path;
///
/// let instance = Instance::new("Instance_1", "code_review/output/Instance_1");
/// assert_eq!(instance.key.as_str(), "Instance_1");
/// assert_eq!(
///     instance.listing_path(),
///     Path::new("code_review/output/Instance_1/out.lst")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "name")]
    pub key: InstanceKey,
    pub output_dir: PathBuf,
}

impl Instance {
    pub fn new(key: impl Into<InstanceKey>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(LOG_FILE)
    }

    pub fn listing_path(&self) -> PathBuf {
        self.output_dir.join(LISTING_FILE)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.output_dir.join(PROFILE_FILE)
    }

    pub fn profile_report_path(&self) -> PathBuf {
        self.output_dir.join(PROFILE_REPORT_FILE)
    }
}
