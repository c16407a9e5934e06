//! Markdown table rendering.

use std::fmt::Write as _;

use crate::numeric::{format_grouped_float, format_grouped_int};

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Rendered with `,` thousands separators.
    Int(u64),
    /// Rendered with `,` thousands separators and 2 decimals.
    Float(f64),
    /// Rendered as `nan`.
    Missing,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn optional_float(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Float)
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Int(value) => format_grouped_int(*value),
            Cell::Float(value) => format_grouped_float(*value),
            Cell::Missing => "nan".to_string(),
        }
    }
}

/// Pipe-style Markdown table with padded columns.
///
/// # Example
///
/// ```
/// use solvereview_core::{Align, Cell, MarkdownTable};
///
/// let mut table = MarkdownTable::new()
///     .column("Instance", Align::Left)
///     .column("# Rows", Align::Right);
/// table.push_row(vec![Cell::text("Instance_1"), Cell::Int(12500)]);
///
/// let md = table.render();
/// assert!(md.starts_with("| Instance   | # Rows |"));
/// assert!(md.contains("| Instance_1 | 12,500 |"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownTable {
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<Cell>>,
}

impl MarkdownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column definition.
    pub fn column(mut self, header: impl Into<String>, align: Align) -> Self {
        self.columns.push((header.into(), align));
        self
    }

    /// Appends a row. Short rows are padded with empty text cells.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Text(String::new()));
        self.rows.push(cells);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renders the table, one line per row, each line newline-terminated.
    pub fn render(&self) -> String {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Cell::render).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                rendered
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();

        let header: Vec<&str> = self.columns.iter().map(|(h, _)| h.as_str()).collect();
        self.write_line(&mut output, &header, &widths);

        output.push('|');
        for ((_, align), width) in self.columns.iter().zip(&widths) {
            let dashes = "-".repeat(*width + 1);
            match align {
                Align::Left => {
                    let _ = write!(output, ":{dashes}|");
                }
                Align::Right => {
                    let _ = write!(output, "{dashes}:|");
                }
            }
        }
        output.push('\n');

        for row in &rendered {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.write_line(&mut output, &cells, &widths);
        }

        output
    }

    fn write_line(&self, output: &mut String, cells: &[&str], widths: &[usize]) {
        output.push('|');
        for ((cell, (_, align)), &width) in cells.iter().zip(&self.columns).zip(widths) {
            let _ = match align {
                Align::Left => write!(output, " {cell:<width$} |"),
                Align::Right => write!(output, " {cell:>width$} |"),
            };
        }
        output.push('\n');
    }
}
