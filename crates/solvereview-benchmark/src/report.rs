//! Report generation for review results.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use solvereview_core::{Result, ReviewError};
use tracing::info;

use crate::compare::ComparisonTable;
use crate::result::{InstanceRow, InstanceTable};

/// CSV exporter for instance tables.
///
/// One row per instance, headed by the column names of [`InstanceRow`].
/// Missing values are written as empty fields.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::{CsvExporter, InstanceTable};
///
/// let csv = CsvExporter::to_string(&InstanceTable::new()).unwrap();
/// assert!(csv.starts_with("Instance,Model Status,Elapsed Time [s],"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the table to a CSV string.
    pub fn to_string(table: &InstanceTable) -> Result<String> {
        let mut buffer = Vec::new();
        Self::write(table, &mut buffer, Path::new("<memory>"))?;
        String::from_utf8(buffer).map_err(|err| ReviewError::Csv {
            path: PathBuf::from("<memory>"),
            message: err.to_string(),
        })
    }

    /// Exports the table to a CSV file, replacing any existing file.
    pub fn to_file(table: &InstanceTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;
        let file = fs::File::create(path).map_err(|err| ReviewError::io(path, err))?;
        Self::write(table, file, path)
    }

    /// Writes the table as CSV to a writer; `path` is only used in errors.
    pub fn write<W: Write>(table: &InstanceTable, writer: W, path: &Path) -> Result<()> {
        let csv_error = |err: csv::Error| ReviewError::Csv {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        let mut writer = csv::Writer::from_writer(writer);
        if table.is_empty() {
            writer.write_record(HEADERS).map_err(csv_error)?;
        }
        for row in table.rows() {
            writer.serialize(row).map_err(csv_error)?;
        }
        writer
            .flush()
            .map_err(|err| ReviewError::io(path, err))
    }

    /// Reads an instance table previously written by [`CsvExporter`].
    ///
    /// # Errors
    ///
    /// [`ReviewError::SchemaMismatch`] if the file has no `Instance` column
    /// or a row does not fit [`InstanceRow`].
    pub fn read(path: impl AsRef<Path>) -> Result<InstanceTable> {
        let path = path.as_ref();
        let csv_error = |err: csv::Error| ReviewError::Csv {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
        let mismatch = |reason: String| ReviewError::SchemaMismatch {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
        let headers = reader.headers().map_err(csv_error)?;
        if !headers.iter().any(|h| h == HEADERS[0]) {
            return Err(mismatch(format!("missing `{}` column", HEADERS[0])));
        }

        let mut table = InstanceTable::new();
        for row in reader.deserialize::<InstanceRow>() {
            let row = row.map_err(|err| {
                if matches!(
                    err.kind(),
                    csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
                ) {
                    mismatch(err.to_string())
                } else {
                    csv_error(err)
                }
            })?;
            table.push(row);
        }
        Ok(table)
    }
}

const HEADERS: [&str; 19] = [
    "Instance",
    "Model Status",
    "Elapsed Time [s]",
    "Total Seconds [s]",
    "Compilation Time [s]",
    "Execution Time [s]",
    "Generation Time [s]",
    "Solver Time [s]",
    "Startup Time [s]",
    "Closedown Time [s]",
    "Highwater RSS [GB]",
    "Highwater VSS [GB]",
    "# Rows",
    "# Columns",
    "# Non Zeros",
    "# Non Zeros per s",
    "RHS [min, max]",
    "Bound [min, max]",
    "Matrix [min, max]",
];

/// Markdown report combining the delta, new and baseline tables.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::{ComparisonTable, InstanceTable, MarkdownReport};
///
/// let empty = InstanceTable::new();
/// let md = MarkdownReport::to_string(&empty, &empty, &ComparisonTable::default());
/// assert!(md.starts_with("# Results\n\n## Improvement\n"));
/// assert!(md.contains("\n## New\n"));
/// assert!(md.contains("\n## Ground Truth\n"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates the report string: delta first, then new, then baseline.
    pub fn to_string(
        baseline: &InstanceTable,
        new: &InstanceTable,
        delta: &ComparisonTable,
    ) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "# Results");
        let _ = writeln!(output);
        let _ = writeln!(output, "## Improvement");
        output.push_str(&delta.to_markdown());
        let _ = writeln!(output);
        let _ = writeln!(output, "## New");
        output.push_str(&new.to_markdown());
        let _ = writeln!(output);
        let _ = writeln!(output, "## Ground Truth");
        output.push_str(&baseline.to_markdown());

        output
    }

    /// Writes the report to a writer.
    pub fn write<W: Write>(
        baseline: &InstanceTable,
        new: &InstanceTable,
        delta: &ComparisonTable,
        mut writer: W,
    ) -> io::Result<()> {
        writer.write_all(Self::to_string(baseline, new, delta).as_bytes())
    }
}

/// Persists the combined report at a fixed path.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the report, replacing any existing document.
    pub fn write(
        &self,
        baseline: &InstanceTable,
        new: &InstanceTable,
        delta: &ComparisonTable,
    ) -> Result<()> {
        let report = MarkdownReport::to_string(baseline, new, delta);
        create_parent(&self.path)?;
        fs::write(&self.path, report).map_err(|err| ReviewError::io(&self.path, err))?;
        info!(event = "report_written", path = %self.path.display());
        Ok(())
    }
}

/// Creates the directory `path` will be written into.
pub(crate) fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|err| ReviewError::io(dir, err))
        }
        _ => Ok(()),
    }
}
