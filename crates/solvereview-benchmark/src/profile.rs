//! Cross-instance profile summary.

use std::collections::BTreeMap;

use solvereview_core::numeric::round_half_even2;
use solvereview_core::{Align, Cell, InstanceKey, MarkdownTable};
use solvereview_parse::ProfileTable;

/// Time spent on one statement description, summed over every instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummaryRow {
    pub description: String,
    pub total_seconds: f64,
    /// Share of each instance's execution time, in instance order; `None`
    /// when the instance never ran a statement with this description.
    pub share_by_instance: Vec<Option<f64>>,
}

/// Profile entries of all instances grouped by description, slowest first.
///
/// # Example
///
/// ```
/// use solvereview_benchmark::ProfileSummary;
/// use solvereview_core::InstanceKey;
/// use solvereview_parse::{ProfileEntry, ProfileTable};
///
/// let entry = |line, seconds, description: &str| ProfileEntry {
///     line,
///     calls: 1,
///     cumulative_seconds: seconds,
///     memory: 0.0,
///     description: description.to_string(),
/// };
/// let first = ProfileTable::new(vec![entry(1, 2.0, "Loop"), entry(2, 1.0, "Solve")], 10.0);
/// let second = ProfileTable::new(vec![entry(7, 3.0, "Solve")], 20.0);
///
/// let summary = ProfileSummary::from_tables(&[
///     (InstanceKey::from("Instance_1"), first),
///     (InstanceKey::from("Instance_2"), second),
/// ]);
///
/// assert_eq!(summary.rows()[0].description, "Solve");
/// assert_eq!(summary.rows()[0].total_seconds, 4.0);
/// assert_eq!(summary.rows()[0].share_by_instance, vec![Some(10.0), Some(15.0)]);
/// assert_eq!(summary.rows()[1].share_by_instance, vec![Some(20.0), None]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSummary {
    instances: Vec<InstanceKey>,
    rows: Vec<ProfileSummaryRow>,
}

impl ProfileSummary {
    /// Groups the entries of every table by description.
    ///
    /// Groups are formed in ascending description order and then stably
    /// sorted by total time, descending.
    pub fn from_tables(tables: &[(InstanceKey, ProfileTable)]) -> Self {
        let mut groups: BTreeMap<&str, (f64, Vec<Option<f64>>)> = BTreeMap::new();

        for (index, (_, table)) in tables.iter().enumerate() {
            for row in table.rows() {
                let (total, per_instance) = groups
                    .entry(row.entry.description.as_str())
                    .or_insert_with(|| (0.0, vec![None; tables.len()]));
                *total += row.entry.cumulative_seconds;
                *per_instance[index].get_or_insert(0.0) += row.entry.cumulative_seconds;
            }
        }

        let mut rows: Vec<ProfileSummaryRow> = groups
            .into_iter()
            .map(|(description, (total_seconds, per_instance))| ProfileSummaryRow {
                description: description.to_string(),
                total_seconds,
                share_by_instance: per_instance
                    .into_iter()
                    .zip(tables)
                    .map(|(seconds, (_, table))| {
                        seconds.map(|s| round_half_even2(s / table.execution_seconds() * 100.0))
                    })
                    .collect(),
            })
            .collect();
        rows.sort_by(|a, b| b.total_seconds.total_cmp(&a.total_seconds));

        Self {
            instances: tables.iter().map(|(key, _)| key.clone()).collect(),
            rows,
        }
    }

    pub fn instances(&self) -> &[InstanceKey] {
        &self.instances
    }

    pub fn rows(&self) -> &[ProfileSummaryRow] {
        &self.rows
    }

    /// Returns the `n` slowest descriptions.
    pub fn top(&self, n: usize) -> &[ProfileSummaryRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the `top` slowest descriptions.
    pub fn to_markdown(&self, top: usize) -> String {
        let mut table = MarkdownTable::new()
            .column("Description", Align::Left)
            .column("Total Time [s]", Align::Right);
        for instance in &self.instances {
            table = table.column(format!("{instance} [%]"), Align::Right);
        }

        for row in self.top(top) {
            let mut cells = vec![
                Cell::text(row.description.as_str()),
                Cell::Float(row.total_seconds),
            ];
            cells.extend(row.share_by_instance.iter().map(|&s| Cell::optional_float(s)));
            table.push_row(cells);
        }

        table.render()
    }
}
