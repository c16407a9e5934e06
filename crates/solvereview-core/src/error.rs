//! Error types for solvereview

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::instance::InstanceKey;
use crate::mode::LinkMode;

/// Main error type for solvereview operations.
///
/// Every variant is fatal for the batch that produced it. Parser failures
/// raised while aggregating are wrapped in [`ReviewError::Instance`] so the
/// offending instance is always named.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Run log is missing a tag or carries an unreadable value
    #[error("malformed log {}: {reason}{}", .path.display(), line_context(.line))]
    MalformedLog {
        path: PathBuf,
        reason: String,
        line: Option<String>,
    },

    /// Solve listing is missing a tag or carries an unreadable value
    #[error("malformed listing {} for `{instance}`: {reason}{}", .path.display(), line_context(.line))]
    MalformedListing {
        path: PathBuf,
        instance: InstanceKey,
        reason: String,
        line: Option<String>,
    },

    /// Profile trace row is short or has a non-numeric field
    #[error("malformed profile {}: {reason}{}", .path.display(), line_context(.line))]
    MalformedProfile {
        path: PathBuf,
        reason: String,
        line: Option<String>,
    },

    /// Model status code outside the fixed table
    #[error("unknown model status code {0}")]
    UnknownStatusCode(i64),

    /// Link mode requires an execution-time correction but the listing
    /// never reported a solver resource usage
    #[error("listing {} for `{instance}` has link mode {link_mode} but no RESOURCE USAGE value", .path.display())]
    InconsistentLinkMode {
        path: PathBuf,
        instance: InstanceKey,
        link_mode: LinkMode,
    },

    /// Baseline table for the current run mode does not exist
    #[error("baseline not found: {}", .0.display())]
    MissingBaseline(PathBuf),

    /// Baseline table cannot be aligned with the new table
    #[error("baseline {} does not match the result schema: {reason}", .path.display())]
    SchemaMismatch { path: PathBuf, reason: String },

    /// Run mode text that is neither a full solve nor a solution load
    #[error("unsupported run mode `{0}`")]
    UnsupportedRunMode(String),

    /// Delimited data could not be written or read
    #[error("CSV error in {}: {message}", .path.display())]
    Csv { path: PathBuf, message: String },

    /// File could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure while processing one instance of a batch
    #[error("instance `{instance}`: {source}")]
    Instance {
        instance: InstanceKey,
        #[source]
        source: Box<ReviewError>,
    },
}

impl ReviewError {
    /// Wraps an I/O failure with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attaches the instance being processed to this error.
    pub fn for_instance(self, instance: &InstanceKey) -> Self {
        match self {
            already @ Self::Instance { .. } => already,
            other => Self::Instance {
                instance: instance.clone(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, skipping instance context.
    pub fn root(&self) -> &ReviewError {
        match self {
            Self::Instance { source, .. } => source.root(),
            other => other,
        }
    }
}

fn line_context(line: &Option<String>) -> String {
    match line {
        Some(text) => format!(" (line: `{}`)", text.trim()),
        None => String::new(),
    }
}

/// Result type alias for solvereview operations
pub type Result<T> = std::result::Result<T, ReviewError>;
