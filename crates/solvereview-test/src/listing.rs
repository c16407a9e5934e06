//! Solve listing fixtures.
//!
//! The rendered listing follows the solver's layout closely enough that
//! tag positions match: model statistics, one solve summary, range
//! statistics, and the step summary as the final lines.
//!
//! # Example
//!
//! ```
//! use solvereview_test::listing::ListingFixture;
//!
//! let listing = ListingFixture::new()
//!     .with_model_status(16)
//!     .with_counts(1000, 2000, 50_000)
//!     .render();
//! assert!(listing.contains("**** MODEL STATUS      16 Solved"));
//! assert!(listing.contains("SINGLE VARIABLES        2,000"));
//! assert!(listing.trim_end().ends_with("MAX HEAP SIZE (Mb)"));
//! ```

use solvereview_core::numeric::format_grouped_int;

/// A solve listing with configurable statistics and timings.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingFixture {
    pub model_status: i64,
    pub rows: u64,
    pub columns: u64,
    pub non_zeros: u64,
    /// Adds the `<n> projected` field to the SINGLE VARIABLES line.
    pub projected_columns: Option<u64>,
    pub generation: Option<f64>,
    /// One `RESOURCE USAGE` line per entry, e.g. `"NA"` or `"12.500"`.
    pub resource_usage: Vec<String>,
    pub rhs: (String, String),
    pub bound: (String, String),
    pub matrix: (String, String),
    pub startup: f64,
    pub compilation: f64,
    pub execution: f64,
    pub closedown: f64,
    pub total_seconds: f64,
    pub elapsed: f64,
    omitted: Vec<String>,
}

impl ListingFixture {
    /// Creates a listing of a solved LP with 12.5 seconds of solver time.
    pub fn new() -> Self {
        Self {
            model_status: 1,
            rows: 1000,
            columns: 2000,
            non_zeros: 50_000,
            projected_columns: None,
            generation: Some(10.0),
            resource_usage: vec!["12.500".to_string()],
            rhs: ("1.000E+00".to_string(), "5.000E+03".to_string()),
            bound: ("2.000E-01".to_string(), "1.000E+04".to_string()),
            matrix: ("1.000E-03".to_string(), "8.760E+03".to_string()),
            startup: 0.016,
            compilation: 1.25,
            execution: 95.5,
            closedown: 0.031,
            total_seconds: 96.797,
            elapsed: 110.0,
            omitted: Vec::new(),
        }
    }

    pub fn with_model_status(mut self, code: i64) -> Self {
        self.model_status = code;
        self
    }

    pub fn with_counts(mut self, rows: u64, columns: u64, non_zeros: u64) -> Self {
        self.rows = rows;
        self.columns = columns;
        self.non_zeros = non_zeros;
        self
    }

    pub fn with_projected_columns(mut self, projected: u64) -> Self {
        self.projected_columns = Some(projected);
        self
    }

    pub fn with_generation(mut self, seconds: f64) -> Self {
        self.generation = Some(seconds);
        self
    }

    pub fn without_generation(mut self) -> Self {
        self.generation = None;
        self
    }

    pub fn with_resource_usage<I, S>(mut self, usage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_usage = usage.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_execution(mut self, seconds: f64) -> Self {
        self.execution = seconds;
        self
    }

    pub fn with_elapsed(mut self, seconds: f64) -> Self {
        self.elapsed = seconds;
        self
    }

    /// Drops every rendered line containing `tag`.
    pub fn without_line(mut self, tag: &str) -> Self {
        self.omitted.push(tag.to_string());
        self
    }

    /// Renders the listing text.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = vec![
            "GAMS 47.6.0  r2b1c3d4 Released Aug  1, 2024 LEX-LEG x86 64bit/Linux - 10/16/26 10:00:00 Page 1".into(),
            "TIMES -- VERSION 4.8.3".into(),
            "C o m p i l a t i o n".into(),
            String::new(),
            "COMPILATION TIME     =        1.250 SECONDS     45 MB  47.6.0 r2b1c3d4 LEX-LEG".into(),
            String::new(),
            "MODEL STATISTICS".into(),
            String::new(),
            format!(
                "BLOCKS OF EQUATIONS          25     SINGLE EQUATIONS        {}",
                format_grouped_int(self.rows)
            ),
        ];

        let mut variables = format!(
            "BLOCKS OF VARIABLES          30     SINGLE VARIABLES        {}",
            format_grouped_int(self.columns)
        );
        if let Some(projected) = self.projected_columns {
            variables.push_str(&format!("    {projected} projected"));
        }
        lines.push(variables);
        lines.push(format!(
            "NON ZERO ELEMENTS        {}",
            format_grouped_int(self.non_zeros)
        ));
        lines.push(String::new());

        if let Some(generation) = self.generation {
            lines.push(format!(
                "GENERATION TIME      = {generation:>12.3} SECONDS    512 MB  47.6.0 r2b1c3d4 LEX-LEG"
            ));
            lines.push(String::new());
        }

        lines.push("RANGE STATISTICS (ABSOLUTE NON-ZERO FINITE VALUES)".into());
        lines.push(String::new());
        lines.push(format!(
            "RHS       [min, max] : [ {}, {}] - Zero values observed as well",
            self.rhs.0, self.rhs.1
        ));
        lines.push(format!(
            "Bound     [min, max] : [ {}, {}] - Zero values observed as well",
            self.bound.0, self.bound.1
        ));
        lines.push(format!(
            "Matrix    [min, max] : [ {}, {}]",
            self.matrix.0, self.matrix.1
        ));
        lines.push(String::new());

        lines.push("               S O L V E      S U M M A R Y".into());
        lines.push(String::new());
        lines.push("     MODEL   TIMES               OBJECTIVE  objZ".into());
        lines.push("     TYPE    LP                  DIRECTION  MINIMIZE".into());
        lines.push("     SOLVER  CPLEX               FROM LINE  4321".into());
        lines.push(String::new());
        lines.push("**** SOLVER STATUS     1 Normal Completion".into());
        lines.push(format!(
            "**** MODEL STATUS      {} {}",
            self.model_status,
            status_word(self.model_status)
        ));
        lines.push("**** OBJECTIVE VALUE        123456.7890".into());
        lines.push(String::new());
        for usage in &self.resource_usage {
            lines.push(format!(" RESOURCE USAGE, LIMIT {usage:>15}     43200.000"));
            lines.push(" ITERATION COUNT, LIMIT         0    2147483647".into());
        }
        lines.push(String::new());

        lines.push(format!(
            "EXECUTION TIME       = {:>12.3} SECONDS    812 MB  47.6.0 r2b1c3d4 LEX-LEG",
            self.execution
        ));
        lines.push(String::new());
        lines.push("USER: Code Review                                    G241001|0002AO-GEN".into());
        lines.push("      Energy Systems Analysis                                    DCE1234".into());
        lines.push(String::new());
        lines.push("**** FILE SUMMARY".into());
        lines.push(String::new());
        lines.push("Input      /data/Instance.RUN".into());
        lines.push("Output     /output/out.lst".into());
        lines.push(format!(
            "STEP SUMMARY: {:>12.3} {:>13.3} STARTUP",
            self.startup, self.startup
        ));
        lines.push(step_line(self.compilation, "COMPILATION"));
        lines.push(step_line(self.execution, "EXECUTION"));
        lines.push(step_line(self.closedown, "CLOSEDOWN"));
        lines.push(step_line(self.total_seconds, "TOTAL SECONDS"));
        lines.push(step_line(self.elapsed, "ELAPSED SECONDS"));
        lines.push(step_line(812.117, "MAX HEAP SIZE (Mb)"));

        let mut text = lines
            .into_iter()
            .filter(|line| !self.omitted.iter().any(|tag| line.contains(tag.as_str())))
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        text
    }
}

impl Default for ListingFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn step_line(seconds: f64, keyword: &str) -> String {
    format!("{seconds:>26.3} {seconds:>13.3} {keyword}")
}

fn status_word(code: i64) -> &'static str {
    match code {
        1 => "Optimal",
        16 => "Solved",
        _ => "Other",
    }
}
