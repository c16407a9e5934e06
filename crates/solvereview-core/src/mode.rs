//! Run modes and solver link modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Whether a batch performed a full solve or loaded a saved solution.
///
/// Set once per batch. A loaded-solution run has no solver time and is
/// compared against its own baseline table.
///
/// # Example
///
/// ```
/// use solvereview_core::RunMode;
///
/// let mode: RunMode = "LOADSOLUTION".parse().unwrap();
/// assert_eq!(mode, RunMode::LoadOnly);
/// assert!(!mode.solves());
/// assert!("RESTART".parse::<RunMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Complete run including the solve.
    #[serde(alias = "SOLVE", alias = "solve")]
    FullSolve,

    /// Solution restored from a savepoint; the solve is skipped.
    #[default]
    #[serde(alias = "LOADSOLUTION", alias = "loadsolution")]
    LoadOnly,
}

impl RunMode {
    /// Returns true when the run invoked the solver.
    pub fn solves(self) -> bool {
        matches!(self, RunMode::FullSolve)
    }

    /// Returns the solver's own spelling of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::FullSolve => "SOLVE",
            RunMode::LoadOnly => "LOADSOLUTION",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solve" | "full_solve" => Ok(RunMode::FullSolve),
            "loadsolution" | "load_only" => Ok(RunMode::LoadOnly),
            _ => Err(ReviewError::UnsupportedRunMode(s.to_string())),
        }
    }
}

/// Solver link mode reported in the run log.
///
/// Identifies which execution path handled the solve. For some paths the
/// reported execution time already contains the solver time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkMode(u8);

impl LinkMode {
    pub fn new(code: u8) -> Self {
        Self(code)
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// Returns true when reported execution time double-counts solver time.
    ///
    /// # Example
    ///
    /// ```
    /// use solvereview_core::LinkMode;
    ///
    /// assert!(LinkMode::new(5).includes_solver_time());
    /// assert!(!LinkMode::new(3).includes_solver_time());
    /// ```
    pub fn includes_solver_time(self) -> bool {
        matches!(self.0, 1 | 2 | 5)
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
