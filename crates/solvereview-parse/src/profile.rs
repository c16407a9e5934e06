//! Profiling trace parsing.

use std::path::Path;

use solvereview_core::numeric::round_half_even2;
use solvereview_core::{Align, Cell, MarkdownTable, Result, ReviewError};
use tracing::debug;

use crate::rule::{read_report, Line};

/// Line number, call count, time, memory, then a free-text description.
const MIN_FIELDS: usize = 5;

/// One statement of a profiling trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    /// Source line of the statement; unique within one trace.
    pub line: u32,
    pub calls: u64,
    pub cumulative_seconds: f64,
    pub memory: f64,
    pub description: String,
}

/// A profile entry ranked against the instance's execution time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    pub entry: ProfileEntry,
    /// Cumulative time as a percentage of execution time, 2 decimals.
    pub share_of_execution: f64,
}

/// Profile entries of one instance, slowest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    rows: Vec<ProfileRow>,
    execution_seconds: f64,
}

impl ProfileTable {
    /// Ranks entries by cumulative time, descending. Ties keep trace order.
    pub fn new(mut entries: Vec<ProfileEntry>, execution_seconds: f64) -> Self {
        entries.sort_by(|a, b| b.cumulative_seconds.total_cmp(&a.cumulative_seconds));
        let rows = entries
            .into_iter()
            .map(|entry| ProfileRow {
                share_of_execution: round_half_even2(
                    entry.cumulative_seconds / execution_seconds * 100.0,
                ),
                entry,
            })
            .collect();
        Self {
            rows,
            execution_seconds,
        }
    }

    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    pub fn execution_seconds(&self) -> f64 {
        self.execution_seconds
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table indexed by statement line.
    pub fn to_markdown(&self) -> String {
        let mut table = MarkdownTable::new()
            .column("Line", Align::Right)
            .column("Total Time [s]", Align::Right)
            .column("relative to Execution Time [%]", Align::Right)
            .column("Description", Align::Left);

        for row in &self.rows {
            table.push_row(vec![
                Cell::Int(u64::from(row.entry.line)),
                Cell::Float(row.entry.cumulative_seconds),
                Cell::Float(row.share_of_execution),
                Cell::text(row.entry.description.as_str()),
            ]);
        }

        table.render()
    }

    /// Writes the rendered table to `path`, replacing any existing file.
    pub fn write_markdown(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_markdown()).map_err(|err| ReviewError::io(path, err))
    }
}

/// Parses per-statement profiling traces.
///
/// Every data line carries at least five whitespace-separated fields;
/// everything after the fourth is rejoined into the description. Leading
/// lines that do not start with a statement number are treated as headers.
///
/// # Example
///
/// ```
/// use solvereview_parse::ProfileParser;
/// use std::path::Path;
///
/// let trace = "\
///    120       1     4.000    35.2  Assignment cost_act(r,t)
///     88       3     6.000    12.0  Loop over regions
/// ";
///
/// let table = ProfileParser::new()
///     .parse_str(trace, Path::new("out.prf"), 20.0)
///     .unwrap();
///
/// let first = &table.rows()[0];
/// assert_eq!(first.entry.line, 88);
/// assert_eq!(first.share_of_execution, 30.0);
/// assert_eq!(table.rows()[1].entry.description, "Assignment cost_act(r,t)");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileParser;

impl ProfileParser {
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses the trace at `path`.
    pub fn parse(&self, path: &Path, execution_seconds: f64) -> Result<ProfileTable> {
        let text = read_report(path)?;
        self.parse_str(&text, path, execution_seconds)
    }

    /// Parses the trace at `trace` and persists its rendered table at `report`.
    pub fn process(
        &self,
        trace: &Path,
        execution_seconds: f64,
        report: &Path,
    ) -> Result<ProfileTable> {
        let table = self.parse(trace, execution_seconds)?;
        table.write_markdown(report)?;
        debug!(entries = table.len(), path = %report.display(), "profile table written");
        Ok(table)
    }

    /// Parses trace text; `path` is only used in error messages.
    pub fn parse_str(&self, text: &str, path: &Path, execution_seconds: f64) -> Result<ProfileTable> {
        let mut entries = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = Line::new(index + 1, raw);
            if line.is_blank() {
                continue;
            }
            let starts_with_number = line.tokens()[0].parse::<u32>().is_ok();
            if entries.is_empty() && !starts_with_number {
                continue;
            }
            entries.push(parse_entry(&line).map_err(|reason| ReviewError::MalformedProfile {
                path: path.to_path_buf(),
                reason,
                line: Some(raw.to_string()),
            })?);
        }

        Ok(ProfileTable::new(entries, execution_seconds))
    }
}

fn parse_entry(line: &Line<'_>) -> std::result::Result<ProfileEntry, String> {
    let tokens = line.tokens();
    if tokens.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} fields, found {}",
            tokens.len()
        ));
    }

    let invalid = |name: &str, token: &str| format!("{name} `{token}` is not numeric");
    Ok(ProfileEntry {
        line: tokens[0].parse().map_err(|_| invalid("line", tokens[0]))?,
        calls: tokens[1].parse().map_err(|_| invalid("call count", tokens[1]))?,
        cumulative_seconds: tokens[2].parse().map_err(|_| invalid("time", tokens[2]))?,
        memory: tokens[3].parse().map_err(|_| invalid("memory", tokens[3]))?,
        description: tokens[MIN_FIELDS - 1..].join(" "),
    })
}
