//! Result aggregation and baseline comparison for solvereview.
//!
//! This crate turns the parsed reports of a batch into tables and compares
//! them against a stored baseline.
//!
//! # Overview
//!
//! - [`Aggregator`] parses every instance and builds one [`InstanceTable`]
//!   plus a cross-instance [`ProfileSummary`]
//! - [`BaselineComparator`] computes percentage deltas against the
//!   baseline for the batch's run mode
//! - [`ReportWriter`] renders delta, new and baseline tables into one
//!   Markdown document
//! - [`CsvExporter`] persists and reloads instance tables
//!
//! Processing is sequential and fail-fast: one malformed instance aborts
//! the batch.
//!
//! # Example
//!
//! ```
//! use solvereview_benchmark::{percentage_delta, Metric};
//!
//! assert_eq!(Metric::Elapsed.header(), "Elapsed Time [s]");
//! assert_eq!(Metric::Elapsed.delta_header(), "Elapsed Time [%]");
//! assert_eq!(percentage_delta(Some(110.0), Some(100.0)), Some(10.0));
//! ```
//!
//! Full pipeline:
//!
//! ```text
//! let config = ReviewConfig::load("review.toml")?;
//! let aggregation = Aggregator::from_config(&config).aggregate(&config.instances)?;
//! let (baseline, delta) = BaselineComparator::for_mode(&config, config.solve_mode)
//!     .compare(&aggregation.table)?;
//! ReportWriter::new(&config.report).write(&baseline, &aggregation.table, &delta)?;
//! ```

mod compare;
mod profile;
mod report;
mod result;
mod runner;

#[cfg(test)]
mod tests;

pub use compare::{percentage_delta, BaselineComparator, ComparisonTable, DeltaRow, MEAN_ROW};
pub use profile::{ProfileSummary, ProfileSummaryRow};
pub use report::{CsvExporter, MarkdownReport, ReportWriter};
pub use result::{non_zeros_per_second, InstanceRow, InstanceTable, Metric, METRIC_COUNT};
pub use runner::{Aggregation, Aggregator};
