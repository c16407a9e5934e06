//! Model status lookup.

use std::collections::BTreeMap;

use crate::error::{Result, ReviewError};

const STANDARD_LABELS: [(i64, &str); 19] = [
    (1, "OPTIMAL"),
    (2, "LOCALLY OPTIMAL"),
    (3, "UNBOUNDED"),
    (4, "INFEASIBLE"),
    (5, "LOCALLY INFEASIBLE"),
    (6, "INTERMEDIATE INFEASIBLE"),
    (7, "FEASIBLE SOLUTION"),
    (8, "INTEGER SOLUTION"),
    (9, "INTERMEDIATE NON-INTEGER"),
    (10, "INTEGER INFEASIBLE"),
    (11, "LIC PROBLEM - NO SOLUTION"),
    (12, "ERROR UNKNOWN"),
    (13, "ERROR NO SOLUTION"),
    (14, "NO SOLUTION RETURNED"),
    (15, "SOLVED UNIQUE"),
    (16, "SOLVED"),
    (17, "SOLVED SINGULAR"),
    (18, "UNBOUNDED - NO SOLUTION"),
    (19, "INFEASIBLE - NO SOLUTION"),
];

/// Immutable mapping from solver model-status codes to labels.
///
/// Built once and handed to the listing parser. Unknown codes are an
/// error; there is no fallback label.
///
/// # Example
///
/// ```
/// use solvereview_core::StatusCodes;
///
/// let codes = StatusCodes::standard();
/// assert_eq!(codes.resolve(16).unwrap(), "SOLVED");
/// assert!(codes.resolve(42).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StatusCodes {
    labels: BTreeMap<i64, &'static str>,
}

impl StatusCodes {
    /// Creates the table of the 19 model statuses the solver reports.
    pub fn standard() -> Self {
        Self {
            labels: STANDARD_LABELS.into_iter().collect(),
        }
    }

    /// Resolves a status code to its label.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::UnknownStatusCode`] for codes outside the table.
    pub fn resolve(&self, code: i64) -> Result<&'static str> {
        self.labels
            .get(&code)
            .copied()
            .ok_or(ReviewError::UnknownStatusCode(code))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self::standard()
    }
}
