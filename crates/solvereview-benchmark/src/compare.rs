//! Baseline comparison.

use std::path::{Path, PathBuf};

use solvereview_config::ReviewConfig;
use solvereview_core::numeric::round_half_even2;
use solvereview_core::{Align, Cell, MarkdownTable, Result, ReviewError, RunMode};
use tracing::info;

use crate::report::CsvExporter;
use crate::result::{InstanceTable, Metric, METRIC_COUNT};

/// Label of the row holding the column means.
pub const MEAN_ROW: &str = "mean";

/// Percentage change of one row against the baseline, one value per
/// [`Metric`] in [`Metric::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRow {
    pub label: String,
    pub deltas: [Option<f64>; METRIC_COUNT],
}

impl DeltaRow {
    pub fn delta(&self, metric: Metric) -> Option<f64> {
        Metric::ALL
            .iter()
            .position(|&m| m == metric)
            .and_then(|i| self.deltas[i])
    }

    fn is_undefined(&self) -> bool {
        self.deltas.iter().all(Option::is_none)
    }
}

/// Per-instance deltas plus a trailing mean row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    rows: Vec<DeltaRow>,
}

impl ComparisonTable {
    pub fn rows(&self) -> &[DeltaRow] {
        &self.rows
    }

    pub fn get(&self, label: &str) -> Option<&DeltaRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    /// Returns the mean row, unless every mean was undefined.
    pub fn mean(&self) -> Option<&DeltaRow> {
        self.get(MEAN_ROW)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table with 2-decimal percentages.
    pub fn to_markdown(&self) -> String {
        let mut table = MarkdownTable::new().column("Instance", Align::Left);
        for metric in Metric::ALL {
            table = table.column(metric.delta_header(), Align::Right);
        }

        for row in &self.rows {
            let mut cells = vec![Cell::text(row.label.as_str())];
            cells.extend(row.deltas.iter().map(|&d| Cell::optional_float(d)));
            table.push_row(cells);
        }

        table.render()
    }
}

/// `(new - baseline) / baseline * 100`, rounded to 2 decimals.
///
/// Missing inputs and `0 / 0` give `None`; a zero baseline with a
/// non-zero new value gives an infinite delta.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::percentage_delta;
///
/// assert_eq!(percentage_delta(Some(110.0), Some(100.0)), Some(10.0));
/// assert_eq!(percentage_delta(None, Some(100.0)), None);
/// assert_eq!(percentage_delta(Some(0.0), Some(0.0)), None);
/// ```
pub fn percentage_delta(new: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    let delta = round_half_even2((new? - baseline?) / baseline? * 100.0);
    (!delta.is_nan()).then_some(delta)
}

fn mean_row(rows: &[DeltaRow]) -> DeltaRow {
    let mut deltas = [None; METRIC_COUNT];
    for (column, slot) in deltas.iter_mut().enumerate() {
        let values: Vec<f64> = rows.iter().filter_map(|row| row.deltas[column]).collect();
        if values.is_empty() {
            continue;
        }
        let mean = round_half_even2(values.iter().sum::<f64>() / values.len() as f64);
        *slot = (!mean.is_nan()).then_some(mean);
    }
    DeltaRow {
        label: MEAN_ROW.to_string(),
        deltas,
    }
}

/// Compares a new instance table against the stored baseline for its run
/// mode.
#[derive(Debug, Clone)]
pub struct BaselineComparator {
    baseline: PathBuf,
}

impl BaselineComparator {
    /// Creates a comparator reading the baseline at `baseline`.
    pub fn new(baseline: impl Into<PathBuf>) -> Self {
        Self {
            baseline: baseline.into(),
        }
    }

    /// Creates a comparator for the baseline configured for `mode`.
    pub fn for_mode(config: &ReviewConfig, mode: RunMode) -> Self {
        Self::new(config.baseline_path(mode))
    }

    pub fn baseline_path(&self) -> &Path {
        &self.baseline
    }

    /// Loads the baseline and computes the delta table.
    ///
    /// # Errors
    ///
    /// [`ReviewError::MissingBaseline`] if the baseline file does not exist,
    /// [`ReviewError::SchemaMismatch`] if it cannot be read as an instance
    /// table or shares no instance with `new`.
    pub fn compare(&self, new: &InstanceTable) -> Result<(InstanceTable, ComparisonTable)> {
        if !self.baseline.exists() {
            return Err(ReviewError::MissingBaseline(self.baseline.clone()));
        }
        let baseline = CsvExporter::read(&self.baseline)?;
        let delta = self.delta(new, &baseline)?;

        info!(
            event = "compare_end",
            rows = delta.len(),
            baseline = %self.baseline.display(),
        );
        Ok((baseline, delta))
    }

    /// Computes the delta of `new` against an already loaded `baseline`.
    ///
    /// Rows follow `new`; instances missing from either side yield
    /// undefined rows, which are dropped together with an undefined mean.
    pub fn delta(&self, new: &InstanceTable, baseline: &InstanceTable) -> Result<ComparisonTable> {
        let shared = new
            .rows()
            .iter()
            .any(|row| baseline.get(row.instance.as_str()).is_some());
        if !shared {
            return Err(ReviewError::SchemaMismatch {
                path: self.baseline.clone(),
                reason: "no instance in common with the new results".to_string(),
            });
        }

        let mut rows: Vec<DeltaRow> = new
            .rows()
            .iter()
            .map(|row| {
                let base = baseline.get(row.instance.as_str());
                let mut deltas = [None; METRIC_COUNT];
                for (slot, metric) in deltas.iter_mut().zip(Metric::ALL) {
                    *slot = percentage_delta(row.metric(metric), base.and_then(|b| b.metric(metric)));
                }
                DeltaRow {
                    label: row.instance.to_string(),
                    deltas,
                }
            })
            .collect();

        let mean = mean_row(&rows);
        rows.push(mean);
        rows.retain(|row| !row.is_undefined());

        Ok(ComparisonTable { rows })
    }
}
