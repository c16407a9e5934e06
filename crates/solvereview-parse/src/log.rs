//! Run log parsing.

use std::path::Path;

use solvereview_core::numeric::round_decimal2;
use solvereview_core::{LinkMode, Result, ReviewError, RunMode};

use crate::rule::{apply_first, parse_f64, read_report, ExtractionRule, FieldError, Line};

/// Process-resource metrics from a run log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceRecord {
    /// Solver link mode; only reported for full solves.
    pub link_mode: Option<LinkMode>,
    /// Peak resident memory in GB.
    pub highwater_rss_gb: f64,
    /// Peak virtual memory in GB.
    pub highwater_vss_gb: f64,
}

#[derive(Debug, Default)]
struct LogBuilder {
    link_mode: Option<LinkMode>,
    rss: Option<f64>,
    vss: Option<f64>,
}

const LOG_RULES: [ExtractionRule<LogBuilder>; 3] = [
    ExtractionRule {
        name: "link mode",
        tag: "Solvelink=",
        apply: extract_link_mode,
    },
    ExtractionRule {
        name: "highwater RSS",
        tag: "highwater RSS",
        apply: extract_rss,
    },
    ExtractionRule {
        name: "highwater VSS",
        tag: "highwater VSS",
        apply: extract_vss,
    },
];

// The token looks like `(Solvelink=5):`.
fn extract_link_mode(b: &mut LogBuilder, line: &Line<'_>) -> std::result::Result<(), FieldError> {
    let token = line
        .tokens()
        .iter()
        .find(|t| t.contains("Solvelink="))
        .ok_or_else(|| FieldError::Layout("no `Solvelink=` token".to_string()))?;
    let value = token
        .rsplit('=')
        .next()
        .unwrap_or_default()
        .trim_end_matches(&[')', ':'][..]);
    let code = value.parse::<u8>().map_err(|_| FieldError::Invalid {
        token: value.to_string(),
        expected: "link mode",
    })?;
    b.link_mode = Some(LinkMode::new(code));
    Ok(())
}

fn extract_rss(b: &mut LogBuilder, line: &Line<'_>) -> std::result::Result<(), FieldError> {
    b.rss = Some(memory_gb(line)?);
    Ok(())
}

fn extract_vss(b: &mut LogBuilder, line: &Line<'_>) -> std::result::Result<(), FieldError> {
    b.vss = Some(memory_gb(line)?);
    Ok(())
}

// Value is the second-to-last token, unit the last.
fn memory_gb(line: &Line<'_>) -> std::result::Result<f64, FieldError> {
    let value = parse_f64(line.token_from_end(2)?)?;
    match line.token_from_end(1)? {
        "MB" => Ok(round_decimal2(value / 1000.0)),
        "GB" => Ok(value),
        unit => Err(FieldError::Layout(format!("unrecognized memory unit `{unit}`"))),
    }
}

/// Extracts link mode and peak memory from a run log.
///
/// Memory reported in MB is converted to GB and rounded to 2 decimals.
/// The link mode is required for full solves and ignored otherwise.
#[derive(Debug, Clone, Copy)]
pub struct LogParser {
    mode: RunMode,
}

impl LogParser {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Reads and parses the log at `path`.
    pub fn parse(&self, path: &Path) -> Result<ResourceRecord> {
        let text = read_report(path)?;
        self.parse_str(&text, path)
    }

    /// Parses log text; `path` is only used in error messages.
    pub fn parse_str(&self, text: &str, path: &Path) -> Result<ResourceRecord> {
        let malformed = |reason: String, line: Option<&str>| ReviewError::MalformedLog {
            path: path.to_path_buf(),
            reason,
            line: line.map(str::to_string),
        };

        let mut builder = LogBuilder::default();
        for (index, raw) in text.lines().enumerate() {
            let line = Line::new(index + 1, raw);
            apply_first(&LOG_RULES, &mut builder, &line)
                .map_err(|failure| failure.into_review(|reason| malformed(reason, Some(raw))))?;
        }

        let missing = |tag: &str| malformed(format!("missing `{tag}` tag"), None);
        let highwater_rss_gb = builder.rss.ok_or_else(|| missing("highwater RSS"))?;
        let highwater_vss_gb = builder.vss.ok_or_else(|| missing("highwater VSS"))?;
        let link_mode = match self.mode {
            RunMode::FullSolve => Some(builder.link_mode.ok_or_else(|| missing("Solvelink="))?),
            RunMode::LoadOnly => None,
        };

        Ok(ResourceRecord {
            link_mode,
            highwater_rss_gb,
            highwater_vss_gb,
        })
    }
}
