//! Instance result types.

use serde::{Deserialize, Serialize};
use solvereview_core::{Align, Cell, InstanceKey, MarkdownTable};
use solvereview_parse::{ListingRecord, ResourceRecord};

/// Metrics of one instance, one column per field.
///
/// Field order is the column order of the persisted table; serde names are
/// its headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRow {
    #[serde(rename = "Instance")]
    pub instance: InstanceKey,
    #[serde(rename = "Model Status")]
    pub model_status: String,
    #[serde(rename = "Elapsed Time [s]")]
    pub elapsed: f64,
    #[serde(rename = "Total Seconds [s]")]
    pub total_seconds: f64,
    #[serde(rename = "Compilation Time [s]")]
    pub compilation: f64,
    #[serde(rename = "Execution Time [s]")]
    pub execution: f64,
    #[serde(rename = "Generation Time [s]")]
    pub generation: f64,
    /// Absent for runs that loaded a solution.
    #[serde(rename = "Solver Time [s]")]
    pub solver: Option<f64>,
    #[serde(rename = "Startup Time [s]")]
    pub startup: f64,
    #[serde(rename = "Closedown Time [s]")]
    pub closedown: f64,
    #[serde(rename = "Highwater RSS [GB]")]
    pub highwater_rss_gb: f64,
    #[serde(rename = "Highwater VSS [GB]")]
    pub highwater_vss_gb: f64,
    #[serde(rename = "# Rows")]
    pub rows: u64,
    #[serde(rename = "# Columns")]
    pub columns: u64,
    #[serde(rename = "# Non Zeros")]
    pub non_zeros: u64,
    /// Absent when the generation time is zero.
    #[serde(rename = "# Non Zeros per s")]
    pub non_zeros_per_second: Option<f64>,
    #[serde(rename = "RHS [min, max]")]
    pub rhs: String,
    #[serde(rename = "Bound [min, max]")]
    pub bound: String,
    #[serde(rename = "Matrix [min, max]")]
    pub matrix: String,
}

impl InstanceRow {
    /// Merges the parsed reports of one instance.
    pub fn from_records(
        instance: InstanceKey,
        resources: &ResourceRecord,
        listing: &ListingRecord,
    ) -> Self {
        let timing = &listing.timing;
        let shape = &listing.shape;
        Self {
            instance,
            model_status: listing.status.label.to_string(),
            elapsed: timing.elapsed,
            total_seconds: timing.total_seconds,
            compilation: timing.compilation,
            execution: timing.execution,
            generation: timing.generation,
            solver: timing.solver,
            startup: timing.startup,
            closedown: timing.closedown,
            highwater_rss_gb: resources.highwater_rss_gb,
            highwater_vss_gb: resources.highwater_vss_gb,
            rows: shape.rows,
            columns: shape.columns,
            non_zeros: shape.non_zeros,
            non_zeros_per_second: non_zeros_per_second(shape.non_zeros, timing.generation),
            rhs: shape.rhs.to_string(),
            bound: shape.bound.to_string(),
            matrix: shape.matrix.to_string(),
        }
    }

    /// Returns the value of a numeric column.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Elapsed => Some(self.elapsed),
            Metric::TotalSeconds => Some(self.total_seconds),
            Metric::Compilation => Some(self.compilation),
            Metric::Execution => Some(self.execution),
            Metric::Generation => Some(self.generation),
            Metric::Solver => self.solver,
            Metric::Startup => Some(self.startup),
            Metric::Closedown => Some(self.closedown),
            Metric::HighwaterRss => Some(self.highwater_rss_gb),
            Metric::HighwaterVss => Some(self.highwater_vss_gb),
            Metric::Rows => Some(self.rows as f64),
            Metric::Columns => Some(self.columns as f64),
            Metric::NonZeros => Some(self.non_zeros as f64),
            Metric::NonZerosPerSecond => self.non_zeros_per_second,
        }
    }
}

/// Problem generation throughput; `None` for a zero generation time.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::non_zeros_per_second;
///
/// assert_eq!(non_zeros_per_second(50_000, 10.0), Some(5000.0));
/// assert_eq!(non_zeros_per_second(50_000, 0.0), None);
/// ```
pub fn non_zeros_per_second(non_zeros: u64, generation_seconds: f64) -> Option<f64> {
    (generation_seconds != 0.0).then(|| non_zeros as f64 / generation_seconds)
}

/// The numeric columns of an [`InstanceRow`], in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Elapsed,
    TotalSeconds,
    Compilation,
    Execution,
    Generation,
    Solver,
    Startup,
    Closedown,
    HighwaterRss,
    HighwaterVss,
    Rows,
    Columns,
    NonZeros,
    NonZerosPerSecond,
}

/// Number of numeric columns compared against the baseline.
pub const METRIC_COUNT: usize = 14;

impl Metric {
    pub const ALL: [Metric; METRIC_COUNT] = [
        Metric::Elapsed,
        Metric::TotalSeconds,
        Metric::Compilation,
        Metric::Execution,
        Metric::Generation,
        Metric::Solver,
        Metric::Startup,
        Metric::Closedown,
        Metric::HighwaterRss,
        Metric::HighwaterVss,
        Metric::Rows,
        Metric::Columns,
        Metric::NonZeros,
        Metric::NonZerosPerSecond,
    ];

    /// Column name without its unit suffix.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Elapsed => "Elapsed Time",
            Metric::TotalSeconds => "Total Seconds",
            Metric::Compilation => "Compilation Time",
            Metric::Execution => "Execution Time",
            Metric::Generation => "Generation Time",
            Metric::Solver => "Solver Time",
            Metric::Startup => "Startup Time",
            Metric::Closedown => "Closedown Time",
            Metric::HighwaterRss => "Highwater RSS",
            Metric::HighwaterVss => "Highwater VSS",
            Metric::Rows => "# Rows",
            Metric::Columns => "# Columns",
            Metric::NonZeros => "# Non Zeros",
            Metric::NonZerosPerSecond => "# Non Zeros per s",
        }
    }

    /// Header in the instance table, e.g. `Elapsed Time [s]`.
    pub fn header(self) -> String {
        match self {
            Metric::HighwaterRss | Metric::HighwaterVss => format!("{} [GB]", self.name()),
            Metric::Rows | Metric::Columns | Metric::NonZeros | Metric::NonZerosPerSecond => {
                self.name().to_string()
            }
            _ => format!("{} [s]", self.name()),
        }
    }

    /// Header in the delta table, e.g. `Elapsed Time [%]`.
    pub fn delta_header(self) -> String {
        format!("{} [%]", self.name())
    }
}

/// Rows of a batch, in the order the instances were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceTable {
    rows: Vec<InstanceRow>,
}

impl InstanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<InstanceRow>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: InstanceRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[InstanceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row of `instance`.
    pub fn get(&self, instance: &str) -> Option<&InstanceRow> {
        self.rows.iter().find(|row| row.instance.as_str() == instance)
    }

    /// Renders the table with grouped integers and 2-decimal floats.
    pub fn to_markdown(&self) -> String {
        let mut table = MarkdownTable::new()
            .column("Instance", Align::Left)
            .column("Model Status", Align::Left);
        for metric in Metric::ALL {
            table = table.column(metric.header(), Align::Right);
        }
        table = table
            .column("RHS [min, max]", Align::Left)
            .column("Bound [min, max]", Align::Left)
            .column("Matrix [min, max]", Align::Left);

        for row in &self.rows {
            let mut cells = vec![
                Cell::text(row.instance.as_str()),
                Cell::text(row.model_status.as_str()),
            ];
            cells.extend(Metric::ALL.iter().map(|&metric| match metric {
                Metric::Rows => Cell::Int(row.rows),
                Metric::Columns => Cell::Int(row.columns),
                Metric::NonZeros => Cell::Int(row.non_zeros),
                _ => Cell::optional_float(row.metric(metric)),
            }));
            cells.push(Cell::text(row.rhs.as_str()));
            cells.push(Cell::text(row.bound.as_str()));
            cells.push(Cell::text(row.matrix.as_str()));
            table.push_row(cells);
        }

        table.render()
    }
}

impl FromIterator<InstanceRow> for InstanceTable {
    fn from_iter<I: IntoIterator<Item = InstanceRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
